use crate::{
    catalog::discover::Catalog,
    foundation::error::{LayermintError, LayermintResult},
    sample::universe::Combination,
};

/// Placeholder replaced by the artifact index in image URL templates.
pub const INDEX_PLACEHOLDER: &str = "{index}";

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Collection-wide strings stamped into every record.
pub struct CollectionInfo {
    /// Display name prefix, e.g. `Smoothies` yields `Smoothies #12`.
    pub name: String,
    /// Description copied verbatim into each record.
    pub description: String,
    /// Image URL with `{index}` placeholders.
    pub image_url_template: String,
}

impl CollectionInfo {
    /// Reject templates that cannot produce a usable URL.
    pub fn validate(&self) -> LayermintResult<()> {
        if self.name.trim().is_empty() {
            return Err(LayermintError::configuration(
                "collection name must be non-empty",
            ));
        }
        if self.image_url_template.trim().is_empty() {
            return Err(LayermintError::configuration(
                "image_url_template must be non-empty",
            ));
        }
        if !self.image_url_template.contains(INDEX_PLACEHOLDER) {
            tracing::warn!(
                template = %self.image_url_template,
                "image_url_template has no {{index}} placeholder; every record will share one URL"
            );
        }
        Ok(())
    }

    /// Expand the image URL template for `index`.
    pub fn image_url(&self, index: u64) -> String {
        self.image_url_template
            .replace(INDEX_PLACEHOLDER, &index.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One `{trait_type, value}` pair.
pub struct Attribute {
    /// Category name.
    pub trait_type: String,
    /// Option identifier.
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Metadata document paired 1:1 with a rendered image.
pub struct MetadataRecord {
    /// `"<Collection> #<index>"`.
    pub name: String,
    /// Fixed collection description.
    pub description: String,
    /// Templated image URL.
    pub image: String,
    /// One entry per category, in layer order.
    pub attributes: Vec<Attribute>,
}

impl MetadataRecord {
    /// Build the record for artifact `index` rendered from `combination`.
    pub fn for_combination(
        index: u64,
        combination: &Combination,
        catalog: &Catalog,
        collection: &CollectionInfo,
    ) -> LayermintResult<Self> {
        let options = combination.resolve(catalog)?;
        let attributes = catalog
            .categories()
            .iter()
            .zip(options)
            .map(|(category, option)| Attribute {
                trait_type: category.name.clone(),
                value: option.id.clone(),
            })
            .collect();

        Ok(Self {
            name: format!("{} #{index}", collection.name),
            description: collection.description.clone(),
            image: collection.image_url(index),
            attributes,
        })
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> LayermintResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LayermintError::serde(e.to_string()))
    }

    /// Attribute values in order, as `(trait_type, value)` pairs.
    pub fn traits(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|a| (a.trait_type.as_str(), a.value.as_str()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metadata/record.rs"]
mod tests;
