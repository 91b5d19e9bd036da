use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// Set of syllable counts a word must match to be kept.
///
/// A lone count and a one-element collection are the same thing:
/// `TargetCounts::from(1)` equals `TargetCounts::from(vec![1])`.
///
/// Textual specifications (command line, query strings) are parsed with
/// [`FromStr`]: a count (`"1"`), a comma separated list (`"1,3"`), an
/// inclusive range (`"1-3"`) or any mix of those (`"1,3-4"`).
///
/// # Invariants
/// - `ranges` holds inclusive `(low, high)` bounds with `low <= high`
/// - Ranges are sorted, disjoint and never adjacent
/// - A range is never expanded into its members: `"0-1000000000"` is one entry
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetCounts {
	ranges: Vec<(usize, usize)>,
}

impl TargetCounts {
	/// Sorts and merges `ranges` into the canonical form.
	fn from_ranges(mut ranges: Vec<(usize, usize)>) -> Self {
		ranges.sort_unstable();
		let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
		for (low, high) in ranges {
			match merged.last_mut() {
				Some(last) if low <= last.1.saturating_add(1) => last.1 = last.1.max(high),
				_ => merged.push((low, high)),
			}
		}
		Self { ranges: merged }
	}

	/// Returns `true` if `count` is one of the targets.
	///
	/// Binary search over the range bounds.
	pub fn contains(&self, count: usize) -> bool {
		let index = self.ranges.partition_point(|&(_, high)| high < count);
		self.ranges.get(index).is_some_and(|&(low, _)| low <= count)
	}

	/// Targets in ascending order.
	///
	/// Lazy: a wide range yields its members one at a time.
	pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
		self.ranges.iter().flat_map(|&(low, high)| low..=high)
	}

	pub fn is_empty(&self) -> bool {
		self.ranges.is_empty()
	}
}

impl From<usize> for TargetCounts {
	fn from(count: usize) -> Self {
		Self { ranges: vec![(count, count)] }
	}
}

impl From<Vec<usize>> for TargetCounts {
	fn from(counts: Vec<usize>) -> Self {
		counts.into_iter().collect()
	}
}

impl From<&[usize]> for TargetCounts {
	fn from(counts: &[usize]) -> Self {
		counts.iter().copied().collect()
	}
}

impl<const N: usize> From<[usize; N]> for TargetCounts {
	fn from(counts: [usize; N]) -> Self {
		counts.into_iter().collect()
	}
}

impl FromIterator<usize> for TargetCounts {
	fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
		Self::from_ranges(iter.into_iter().map(|count| (count, count)).collect())
	}
}

impl FromStr for TargetCounts {
	type Err = FilterError;

	/// Parses `"1"`, `"1,2"`, `"1-3"` or a comma separated mix of them.
	///
	/// Parsing cost depends on the length of `spec`, not on the width of
	/// its ranges.
	///
	/// # Errors
	/// `InvalidArgument` on an empty spec, an empty item, a value that is
	/// not a non-negative integer, or a descending range.
	fn from_str(spec: &str) -> Result<Self, Self::Err> {
		if spec.trim().is_empty() {
			return Err(FilterError::InvalidArgument("no syllable count given".to_owned()));
		}

		let mut ranges = Vec::new();
		for item in spec.split(',').map(str::trim) {
			match item.split_once('-') {
				Some((low, high)) => {
					let low = parse_count(low.trim(), item)?;
					let high = parse_count(high.trim(), item)?;
					if low > high {
						return Err(FilterError::InvalidArgument(format!(
							"range '{}' is descending",
							item
						)));
					}
					ranges.push((low, high));
				}
				None => {
					let count = parse_count(item, item)?;
					ranges.push((count, count));
				}
			}
		}

		Ok(Self::from_ranges(ranges))
	}
}

/// Parses one count, reporting the whole `item` on failure.
fn parse_count(value: &str, item: &str) -> Result<usize, FilterError> {
	value
		.parse::<usize>()
		.map_err(|_| FilterError::InvalidArgument(format!("'{}' is not a syllable count", item)))
}

/// Canonical form: `"1,3-5"`. Parsing it gives back an equal value.
impl fmt::Display for TargetCounts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, &(low, high)) in self.ranges.iter().enumerate() {
			if i > 0 {
				write!(f, ",")?;
			}
			if low == high {
				write!(f, "{}", low)?;
			} else {
				write!(f, "{}-{}", low, high)?;
			}
		}
		Ok(())
	}
}
