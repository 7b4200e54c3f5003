//! Name and category indexes over the parameter list
//!
//! Parameters live in one vector owned by the document. The indexes only
//! hold [`ParameterId`] slots into that vector, so an update made through
//! either index lands on the single canonical parameter.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::Parameter;

/// Stable slot of a parameter in the document's parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterId(usize);

impl ParameterId {
    /// Position in the parameter list.
    pub fn slot(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct CategoryBucket {
    name: String,
    members: Vec<ParameterId>,
}

/// Lookup structures built once at load time.
///
/// Categories iterate in first-encounter order and members within a
/// category keep document order.
#[derive(Debug, Clone, Default)]
pub struct ParameterIndex {
    by_name: HashMap<String, ParameterId>,
    buckets: Vec<CategoryBucket>,
    bucket_by_category: HashMap<String, usize>,
    shadowed: Vec<String>,
}

impl ParameterIndex {
    /// Build both indexes in a single pass.
    ///
    /// When a name appears more than once the last occurrence wins; earlier
    /// occurrences are dropped from their category bucket and reported by
    /// [`ParameterIndex::shadowed`].
    pub fn build(parameters: &[Parameter]) -> Self {
        let mut index = Self {
            by_name: HashMap::with_capacity(parameters.len()),
            ..Self::default()
        };

        for (slot, param) in parameters.iter().enumerate() {
            let id = ParameterId(slot);

            if let Some(previous) = index.by_name.insert(param.name.clone(), id) {
                let previous_category = &parameters[previous.slot()].category;
                if let Some(&bucket) = index.bucket_by_category.get(previous_category) {
                    index.buckets[bucket].members.retain(|member| *member != previous);
                }
                warn!(
                    param = %param.name,
                    shadowed_slot = previous.slot(),
                    slot,
                    "Duplicate parameter name; the later entry wins"
                );
                index.shadowed.push(param.name.clone());
            }

            let buckets = &mut index.buckets;
            let bucket = *index
                .bucket_by_category
                .entry(param.category.clone())
                .or_insert_with(|| {
                    buckets.push(CategoryBucket {
                        name: param.category.clone(),
                        members: Vec::new(),
                    });
                    buckets.len() - 1
                });
            index.buckets[bucket].members.push(id);
        }

        if !index.shadowed.is_empty() {
            index.drop_empty_buckets();
        }

        debug!(
            parameters = index.by_name.len(),
            categories = index.buckets.len(),
            "Built parameter index"
        );
        index
    }

    /// A category that only held shadowed entries disappears entirely.
    fn drop_empty_buckets(&mut self) {
        self.buckets.retain(|bucket| !bucket.members.is_empty());
        self.bucket_by_category = self
            .buckets
            .iter()
            .enumerate()
            .map(|(i, bucket)| (bucket.name.clone(), i))
            .collect();
    }

    /// Look up a parameter slot by name.
    pub fn get(&self, name: &str) -> Option<ParameterId> {
        self.by_name.get(name).copied()
    }

    /// All indexed names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// All categories in first-encounter order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|bucket| bucket.name.as_str())
    }

    /// Members of a category in document order.
    pub fn category(&self, name: &str) -> Option<&[ParameterId]> {
        self.bucket_by_category
            .get(name)
            .map(|&bucket| self.buckets[bucket].members.as_slice())
    }

    /// Categories with their members, in export order.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[ParameterId])> {
        self.buckets
            .iter()
            .map(|bucket| (bucket.name.as_str(), bucket.members.as_slice()))
    }

    /// Names that appeared more than once in the source document.
    pub fn shadowed(&self) -> &[String] {
        &self.shadowed
    }

    /// Number of indexed (visible) parameters.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
