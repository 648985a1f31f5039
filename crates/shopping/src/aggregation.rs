use std::collections::{BTreeMap, BTreeSet};

use fraction::{CheckedAdd, Fraction};
use futures::{StreamExt, TryStreamExt};
use larder_shared::{Error, MeasurementUnit, RecipeIngredientLine, Result};

use crate::extract::extract;
use crate::normalize::{AggregationKey, UnitVocabulary, normalize};
use crate::store::RecipeStore;

pub const DEFAULT_MAX_CONCURRENT_READS: usize = 4;

/// One line of a shopping list: an ingredient and its exact summed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedEntry {
    pub key: AggregationKey,
    pub total: Fraction,
}

impl AggregatedEntry {
    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn unit(&self) -> MeasurementUnit {
        self.key.unit
    }
}

/// Deduplicated ingredients of a recipe selection, sorted by name then unit.
///
/// Totals are exact; rounding only happens when the list is exported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    entries: Vec<AggregatedEntry>,
}

impl ShoppingList {
    /// Merge ingredient lines sharing the same normalized name and unit.
    ///
    /// Amounts must be finite and non-negative. A total that no longer fits
    /// the fraction's integer width fails with `AmountOverflow` instead of
    /// wrapping.
    pub fn from_lines<'a>(
        lines: impl IntoIterator<Item = &'a RecipeIngredientLine>,
        vocabulary: &UnitVocabulary,
    ) -> Result<Self> {
        let mut totals: BTreeMap<AggregationKey, Fraction> = BTreeMap::new();

        for line in lines {
            let amount = &line.ingredient.amount;
            if !is_valid_amount(amount) {
                tracing::warn!(
                    recipe = %line.recipe_id,
                    position = line.position,
                    amount = %amount,
                    "rejected ingredient amount"
                );
                return Err(Error::InvalidAmount(amount.to_string()));
            }

            let key = normalize(&line.ingredient.name, &line.ingredient.unit, vocabulary)?;
            let total = totals.entry(key).or_insert_with(larder_shared::amount::zero);
            *total = total
                .checked_add(amount)
                .ok_or_else(|| Error::AmountOverflow {
                    name: line.ingredient.name.trim().to_owned(),
                    unit: line.ingredient.unit.trim().to_owned(),
                })?;
        }

        Ok(Self {
            entries: totals
                .into_iter()
                .map(|(key, total)| AggregatedEntry { key, total })
                .collect(),
        })
    }

    pub fn entries(&self) -> &[AggregatedEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str, unit: MeasurementUnit) -> Option<&Fraction> {
        self.entries
            .iter()
            .find(|e| e.key.name == name && e.key.unit == unit)
            .map(|e| &e.total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_valid_amount(amount: &Fraction) -> bool {
    match amount.numer() {
        Some(numer) => !amount.is_sign_negative() || *numer == 0,
        None => false,
    }
}

/// Builds shopping lists from recipes held by a [`RecipeStore`].
///
/// Recipe reads are issued concurrently, at most `max_concurrent_reads` at a
/// time, and merged in recipe id order whatever order they complete in.
/// Dropping the future returned by [`Aggregator::aggregate`] cancels every
/// read still pending.
#[derive(Clone)]
pub struct Aggregator<S> {
    store: S,
    max_concurrent_reads: usize,
}

impl<S: RecipeStore> Aggregator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_concurrent_reads: DEFAULT_MAX_CONCURRENT_READS,
        }
    }

    pub fn max_concurrent_reads(mut self, value: usize) -> Self {
        self.max_concurrent_reads = value.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Aggregate the ingredients of the selected recipes.
    ///
    /// Duplicate ids count once. Any missing recipe or invalid line fails the
    /// whole request, no partial list is returned.
    pub async fn aggregate<I, T>(&self, recipe_ids: I) -> Result<ShoppingList>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let recipe_ids: BTreeSet<String> = recipe_ids.into_iter().map(Into::into).collect();
        if recipe_ids.is_empty() {
            return Err(Error::EmptySelection);
        }

        let vocabulary = UnitVocabulary::new(self.store.unit_vocabulary().await?);

        let recipes: Vec<Vec<RecipeIngredientLine>> = futures::stream::iter(recipe_ids.iter())
            .map(|recipe_id| extract(&self.store, recipe_id))
            .buffered(self.max_concurrent_reads)
            .try_collect()
            .await?;

        let list = ShoppingList::from_lines(recipes.iter().flatten(), &vocabulary)?;

        tracing::debug!(
            recipes = recipe_ids.len(),
            entries = list.len(),
            "aggregated shopping list"
        );

        Ok(list)
    }
}
