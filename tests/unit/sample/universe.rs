use std::collections::BTreeSet;

use super::*;

fn catalog() -> Catalog {
    Catalog::from_ids(&[
        ("Background", &["A", "B"][..]),
        ("Body", &["1", "2", "3"][..]),
        ("Eyes", &["X", "Y"][..]),
    ])
    .unwrap()
}

#[test]
fn ranks_follow_cartesian_product_order() {
    let cat = catalog();
    let u = Universe::new(&cat).unwrap();
    assert_eq!(u.len(), 12);

    let first = u.combination(0).unwrap();
    assert_eq!(first.ids(&cat).unwrap(), vec!["A", "1", "X"]);
    let second = u.combination(1).unwrap();
    assert_eq!(second.ids(&cat).unwrap(), vec!["A", "1", "Y"]);
    let last = u.combination(11).unwrap();
    assert_eq!(last.ids(&cat).unwrap(), vec!["B", "3", "Y"]);

    assert!(matches!(
        u.combination(12),
        Err(LayermintError::Capacity(_))
    ));
}

#[test]
fn iter_covers_every_combination_exactly_once() {
    let cat = catalog();
    let u = Universe::new(&cat).unwrap();
    let all: Vec<Combination> = u.iter().collect();
    let distinct: BTreeSet<&Combination> = all.iter().collect();
    assert_eq!(all.len(), 12);
    assert_eq!(distinct.len(), 12);
    assert!(all.iter().all(|c| c.len() == cat.len()));
}

#[test]
fn resolve_rejects_shape_mismatch() {
    let cat = catalog();
    let short = Combination::new(vec![0, 0]);
    assert!(short.resolve(&cat).is_err());
    let out_of_range = Combination::new(vec![0, 5, 0]);
    assert!(out_of_range.resolve(&cat).is_err());
}
