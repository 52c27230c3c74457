use std::collections::HashMap;
use std::hash::Hash;

use rand::Rng;

use crate::error::ChainError;

/// A value paired with its sampling weight.
///
/// Identity is carried by `value`. The weight can only change through the
/// [`WeightedCollection`] that owns the element.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedElement<T> {
	value: T,
	weight: f64,
}

impl<T> WeightedElement<T> {
	/// Creates a new element.
	///
	/// The weight is checked when the element enters a collection through
	/// [`WeightedCollection::add`].
	pub fn new(value: T, weight: f64) -> Self {
		Self { value, weight }
	}

	pub fn value(&self) -> &T {
		&self.value
	}

	pub fn weight(&self) -> f64 {
		self.weight
	}
}

/// An insertion-ordered set of weighted values supporting weighted random draws.
///
/// Conceptually, this is the set of outgoing edges of a Markov chain node,
/// each edge weighted by how many times it was observed.
///
/// ## Invariants
/// - At most one element per distinct value (`index` maps value -> position)
/// - `total_weight` is the sum of all element weights
/// - Iteration order is insertion order, so draws are reproducible for a seeded rng
#[derive(Clone, Debug)]
pub struct WeightedCollection<T> {
	elements: Vec<WeightedElement<T>>,
	index: HashMap<T, usize>,
	total_weight: f64,
}

impl<T> Default for WeightedCollection<T> {
	fn default() -> Self {
		Self {
			elements: Vec::new(),
			index: HashMap::new(),
			total_weight: 0.0,
		}
	}
}

impl<T: Clone + Eq + Hash> WeightedCollection<T> {
	/// Creates a new empty collection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a new element.
	///
	/// # Errors
	/// - [`ChainError::InvalidWeight`] if the weight is not finite and strictly positive
	/// - [`ChainError::DuplicateValue`] if the value is already present.
	///   Use [`update`](Self::update) or [`increment`](Self::increment) instead.
	pub fn add(&mut self, element: WeightedElement<T>) -> Result<(), ChainError>
	where
		T: std::fmt::Debug,
	{
		check_weight(&element.value, element.weight)?;
		if self.index.contains_key(&element.value) {
			return Err(ChainError::DuplicateValue { value: format!("{:?}", element.value) });
		}
		self.push(element);
		Ok(())
	}

	/// Looks up an element by value.
	pub fn get(&self, value: &T) -> Option<&WeightedElement<T>> {
		self.index.get(value).map(|&position| &self.elements[position])
	}

	/// Replaces the weight of an existing element in place.
	///
	/// # Errors
	/// - [`ChainError::InvalidWeight`] if `new_weight` is not finite and strictly positive
	/// - [`ChainError::NotFound`] if the value is absent
	pub fn update(&mut self, value: &T, new_weight: f64) -> Result<(), ChainError>
	where
		T: std::fmt::Debug,
	{
		check_weight(value, new_weight)?;
		let position = *self
			.index
			.get(value)
			.ok_or_else(|| ChainError::NotFound { value: format!("{:?}", value) })?;

		let element = &mut self.elements[position];
		self.total_weight += new_weight - element.weight;
		element.weight = new_weight;
		Ok(())
	}

	/// Records one more observation of `value`.
	///
	/// - If the value already exists, its weight is increased by 1.
	/// - Otherwise, it is appended with an initial weight of 1.
	pub fn increment(&mut self, value: T) {
		match self.index.get(&value) {
			Some(&position) => {
				self.elements[position].weight += 1.0;
				self.total_weight += 1.0;
			}
			None => self.push(WeightedElement::new(value, 1.0)),
		}
	}

	/// Draws an element with probability `weight / total_weight`.
	///
	/// A uniform `r` is drawn in `[0, total_weight)`, then weights are
	/// accumulated in insertion order until the running sum exceeds `r`.
	///
	/// Returns `None` if the collection is empty.
	pub fn draw_random<R: Rng>(&self, rng: &mut R) -> Option<&WeightedElement<T>> {
		if self.elements.is_empty() || self.total_weight <= 0.0 {
			return None;
		}

		let r = rng.random_range(0.0..self.total_weight);

		let mut cumulative = 0.0;
		for element in &self.elements {
			cumulative += element.weight;
			if cumulative > r {
				return Some(element);
			}
		}

		// Floating-point accumulation can land just under `r`
		self.elements.last()
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	pub fn total_weight(&self) -> f64 {
		self.total_weight
	}

	/// Iterates over the elements in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &WeightedElement<T>> {
		self.elements.iter()
	}

	/// Returns `true` if both collections hold the same values with the same
	/// weights, whatever their insertion order.
	pub fn same_weights(&self, other: &Self) -> bool {
		self.len() == other.len()
			&& self
				.elements
				.iter()
				.all(|element| other.get(&element.value).is_some_and(|o| o.weight == element.weight))
	}

	fn push(&mut self, element: WeightedElement<T>) {
		self.index.insert(element.value.clone(), self.elements.len());
		self.total_weight += element.weight;
		self.elements.push(element);
	}
}

fn check_weight<T: std::fmt::Debug>(value: &T, weight: f64) -> Result<(), ChainError> {
	if weight.is_finite() && weight > 0.0 {
		Ok(())
	} else {
		Err(ChainError::InvalidWeight { value: format!("{:?}", value), weight })
	}
}

impl<T: PartialEq> PartialEq for WeightedCollection<T> {
	/// Two collections are equal when they hold the same elements in the same order.
	///
	/// See [`same_weights`](WeightedCollection::same_weights) for an order-insensitive comparison.
	fn eq(&self, other: &Self) -> bool {
		self.elements == other.elements
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn increment_keeps_total_in_sync() {
		let mut collection = WeightedCollection::new();
		collection.increment("a");
		collection.increment("b");
		collection.increment("a");

		assert_eq!(collection.len(), 2);
		assert_eq!(collection.get(&"a").map(WeightedElement::weight), Some(2.0));
		assert_eq!(collection.total_weight(), 3.0);
	}

	#[test]
	fn update_adjusts_total_weight() {
		let mut collection = WeightedCollection::new();
		collection.add(WeightedElement::new("a", 1.0)).unwrap();
		collection.add(WeightedElement::new("b", 2.0)).unwrap();
		collection.update(&"b", 5.0).unwrap();

		assert_eq!(collection.total_weight(), 6.0);
	}

	#[test]
	fn empty_collection_draws_nothing() {
		let collection: WeightedCollection<String> = WeightedCollection::new();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(collection.draw_random(&mut rng).is_none());
	}
}
