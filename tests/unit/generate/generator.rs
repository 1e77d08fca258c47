use std::collections::BTreeSet;

use super::*;
use crate::{
    output::sink::InMemorySink,
    render::{decode::LayerImage, source::InMemoryLayerSource},
};

fn collection() -> CollectionInfo {
    CollectionInfo {
        name: "Smoothies".to_string(),
        description: "4 ur helth. stay smooth.".to_string(),
        image_url_template: "https://img.example.net/{index}.png".to_string(),
    }
}

fn solid(rgba: [u8; 4]) -> LayerImage {
    let px: Vec<u8> = rgba.iter().copied().cycle().take(2 * 2 * 4).collect();
    LayerImage::from_rgba8(2, 2, px).unwrap()
}

fn two_by_two() -> (Catalog, InMemoryLayerSource) {
    let catalog = Catalog::from_ids(&[
        ("Background", &["A", "B"][..]),
        ("Eyes", &["X", "Y"][..]),
    ])
    .unwrap();
    let source = InMemoryLayerSource::new()
        .with("Background", "A", solid([255, 0, 0, 255]))
        .with("Background", "B", solid([0, 255, 0, 255]))
        .with("Eyes", "X", solid([0, 0, 255, 128]))
        .with("Eyes", "Y", solid([255, 255, 255, 64]));
    (catalog, source)
}

fn run(
    catalog: &Catalog,
    source: &mut InMemoryLayerSource,
    opts: GeneratorOpts,
) -> (LayermintResult<GenerationReport>, InMemorySink, Vec<ProgressEvent>) {
    let mut sink = InMemorySink::new();
    let mut events = Vec::new();
    let result = Generator::new(catalog, opts)
        .and_then(|g| g.generate(source, &mut sink, &mut |e| events.push(e.clone())));
    (result, sink, events)
}

#[test]
fn three_of_four_succeeds_without_repeats() {
    let (catalog, mut source) = two_by_two();
    let opts = GeneratorOpts::new(3, collection()).with_seed(1);
    let (report, sink, _) = run(&catalog, &mut source, opts);

    let report = report.unwrap();
    assert_eq!(report.produced, 3);
    assert_eq!(report.max_combinations, 4);
    assert_eq!(report.seed, 1);

    let picked: BTreeSet<Vec<&str>> = sink
        .records()
        .values()
        .map(|r| r.traits().map(|(_, v)| v).collect())
        .collect();
    assert_eq!(picked.len(), 3);
}

#[test]
fn five_of_four_fails_before_writing() {
    let (catalog, mut source) = two_by_two();
    let opts = GeneratorOpts::new(5, collection()).with_seed(1);
    let (report, sink, events) = run(&catalog, &mut source, opts);

    let err = report.unwrap_err();
    assert!(matches!(err, LayermintError::Capacity(_)));
    assert!(err.is_preflight());
    assert_eq!(sink.planned(), None);
    assert!(sink.images().is_empty());
    assert!(events.is_empty());
}

#[test]
fn full_universe_yields_each_combination_once() {
    let (catalog, mut source) = two_by_two();
    let opts = GeneratorOpts::new(4, collection()).with_seed(9);
    let (report, sink, _) = run(&catalog, &mut source, opts);
    assert!(report.unwrap().saturated);

    let picked: BTreeSet<Vec<String>> = sink
        .records()
        .values()
        .map(|r| r.attributes.iter().map(|a| a.value.clone()).collect())
        .collect();
    let expected: BTreeSet<Vec<String>> = [["A", "X"], ["A", "Y"], ["B", "X"], ["B", "Y"]]
        .iter()
        .map(|p| p.iter().map(|s| s.to_string()).collect())
        .collect();
    assert_eq!(picked, expected);
}

#[test]
fn metadata_reconstructs_rendered_combination() {
    let (catalog, mut source) = two_by_two();
    let opts = GeneratorOpts::new(4, collection()).with_seed(3);
    let (report, sink, _) = run(&catalog, &mut source, opts);
    report.unwrap();

    for index in 0..4u64 {
        let record = &sink.records()[&index];
        assert_eq!(record.name, format!("Smoothies #{index}"));
        assert_eq!(record.image, format!("https://img.example.net/{index}.png"));

        let indices: Vec<usize> = catalog
            .categories()
            .iter()
            .zip(&record.attributes)
            .map(|(cat, attr)| {
                assert_eq!(cat.name, attr.trait_type);
                cat.options.iter().position(|o| o.id == attr.value).unwrap()
            })
            .collect();
        let expected =
            render_combination(&catalog, &Combination::new(indices), &mut source).unwrap();
        assert_eq!(sink.images()[&index], expected);
    }
}

#[test]
fn same_seed_same_output() {
    let (catalog, mut source) = two_by_two();
    let (_, a, _) = run(&catalog, &mut source, GeneratorOpts::new(3, collection()).with_seed(77));
    let (_, b, _) = run(&catalog, &mut source, GeneratorOpts::new(3, collection()).with_seed(77));
    assert_eq!(a.records(), b.records());
    assert_eq!(a.images(), b.images());
}

#[test]
fn progress_events_bracket_every_artifact() {
    let (catalog, mut source) = two_by_two();
    let opts = GeneratorOpts::new(2, collection()).with_seed(5);
    let (_, sink, events) = run(&catalog, &mut source, opts);

    assert!(sink.finished());
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        ProgressEvent::Planned {
            requested: 2,
            max_combinations: 4,
            saturated: false,
            seed: 5,
        }
    );
    assert_eq!(events[1], ProgressEvent::Rendered { index: 0, total: 2 });
    assert_eq!(events[2], ProgressEvent::Rendered { index: 1, total: 2 });
    assert_eq!(events[3], ProgressEvent::Finished { produced: 2 });
}

#[test]
fn zero_size_produces_nothing() {
    let (catalog, mut source) = two_by_two();
    let (report, sink, _) = run(&catalog, &mut source, GeneratorOpts::new(0, collection()));
    assert_eq!(report.unwrap().produced, 0);
    assert_eq!(sink.planned(), Some(0));
    assert!(sink.records().is_empty());
}

#[test]
fn mid_run_failure_keeps_earlier_artifacts() {
    let catalog = Catalog::from_ids(&[("Background", &["A", "B", "C"][..])]).unwrap();
    let mut source = InMemoryLayerSource::new()
        .with("Background", "A", solid([1, 1, 1, 255]))
        .with("Background", "B", solid([2, 2, 2, 255]));

    let opts = GeneratorOpts::new(3, collection()).with_seed(11);
    let (report, sink, _) = run(&catalog, &mut source, opts);

    let err = report.unwrap_err();
    assert!(matches!(err, LayermintError::Render(_)));
    assert!(!sink.finished());
    assert!(sink.images().len() < 3);
    assert_eq!(sink.images().len(), sink.records().len());
}

#[test]
fn new_rejects_zero_progress_cadence() {
    let (catalog, _) = two_by_two();
    let mut opts = GeneratorOpts::new(1, collection());
    opts.progress_every = 0;
    assert!(Generator::new(&catalog, opts).is_err());
}
