//! Random data providers handed to blueprint producers.
//!
//! Producers receive a [`SharedFaker`] and pull domain-flavored values from
//! it. [`FakeDataProvider`] is the default implementation, backed by the
//! `fake` crate.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use fake::Fake;
use fake::faker::company::en::{CatchPhrase, CompanyName};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use uuid::Uuid;

/// Categorized random value generators.
pub trait RandomDataProvider: Send + Sync {
	/// A given name.
	fn first_name(&self) -> String;

	/// A family name.
	fn last_name(&self) -> String;

	/// A full person name.
	fn name(&self) -> String;

	/// An account name.
	fn username(&self) -> String;

	/// An email address on a reserved domain.
	fn email(&self) -> String;

	/// A company name.
	fn company_name(&self) -> String;

	/// A company slogan.
	fn catch_phrase(&self) -> String;

	/// A single lorem word.
	fn word(&self) -> String;

	/// `count` lorem words.
	fn words(&self, count: usize) -> Vec<String>;

	/// A lorem sentence with between `min_words` and `max_words` words.
	fn sentence(&self, min_words: usize, max_words: usize) -> String;

	/// `count` lorem paragraphs joined by `separator`.
	fn paragraphs(&self, count: usize, separator: &str) -> String;

	/// An integer in `min..=max`.
	fn number_between(&self, min: i64, max: i64) -> i64;

	/// A float in `min..max`.
	fn float_between(&self, min: f64, max: f64) -> f64;

	/// `true` with probability `ratio` percent.
	fn boolean(&self, ratio: u8) -> bool;

	/// A random UUID.
	fn uuid(&self) -> Uuid;

	/// A timestamp between 2000-01-01 and 2030-01-01.
	fn date_time(&self) -> DateTime<Utc>;
}

/// Shared handle passed into every producer invocation.
pub type SharedFaker = Arc<dyn RandomDataProvider>;

const DATE_TIME_MIN: i64 = 946_684_800;
const DATE_TIME_MAX: i64 = 1_893_456_000;

/// [`RandomDataProvider`] backed by the `fake` crate.
pub struct FakeDataProvider {
	rng: Mutex<StdRng>,
}

impl FakeDataProvider {
	/// Creates a provider seeded from OS entropy.
	pub fn new() -> Self {
		Self {
			rng: Mutex::new(StdRng::from_entropy()),
		}
	}

	/// Creates a provider with reproducible output.
	pub fn seeded(seed: u64) -> Self {
		Self {
			rng: Mutex::new(StdRng::seed_from_u64(seed)),
		}
	}

	/// Wraps the provider in a [`SharedFaker`].
	pub fn shared(self) -> SharedFaker {
		Arc::new(self)
	}

	fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
		let mut rng = self.rng.lock();
		f(&mut rng)
	}
}

impl Default for FakeDataProvider {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for FakeDataProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FakeDataProvider").finish_non_exhaustive()
	}
}

impl RandomDataProvider for FakeDataProvider {
	fn first_name(&self) -> String {
		self.with_rng(|rng| FirstName().fake_with_rng(rng))
	}

	fn last_name(&self) -> String {
		self.with_rng(|rng| LastName().fake_with_rng(rng))
	}

	fn name(&self) -> String {
		self.with_rng(|rng| Name().fake_with_rng(rng))
	}

	fn username(&self) -> String {
		self.with_rng(|rng| Username().fake_with_rng(rng))
	}

	fn email(&self) -> String {
		self.with_rng(|rng| SafeEmail().fake_with_rng(rng))
	}

	fn company_name(&self) -> String {
		self.with_rng(|rng| CompanyName().fake_with_rng(rng))
	}

	fn catch_phrase(&self) -> String {
		self.with_rng(|rng| CatchPhrase().fake_with_rng(rng))
	}

	fn word(&self) -> String {
		self.with_rng(|rng| Word().fake_with_rng(rng))
	}

	fn words(&self, count: usize) -> Vec<String> {
		self.with_rng(|rng| Words(count..count + 1).fake_with_rng(rng))
	}

	fn sentence(&self, min_words: usize, max_words: usize) -> String {
		let (min, max) = ordered(min_words, max_words);
		self.with_rng(|rng| Sentence(min..max + 1).fake_with_rng(rng))
	}

	fn paragraphs(&self, count: usize, separator: &str) -> String {
		self.with_rng(|rng| {
			(0..count)
				.map(|_| Paragraph(3..6).fake_with_rng::<String, _>(rng))
				.collect::<Vec<_>>()
				.join(separator)
		})
	}

	fn number_between(&self, min: i64, max: i64) -> i64 {
		let (min, max) = ordered(min, max);
		self.with_rng(|rng| rng.gen_range(min..=max))
	}

	fn float_between(&self, min: f64, max: f64) -> f64 {
		if min >= max {
			return min;
		}
		self.with_rng(|rng| rng.gen_range(min..max))
	}

	fn boolean(&self, ratio: u8) -> bool {
		let probability = f64::from(ratio.min(100)) / 100.0;
		self.with_rng(|rng| rng.gen_bool(probability))
	}

	fn uuid(&self) -> Uuid {
		let mut bytes = [0u8; 16];
		self.with_rng(|rng| rng.fill_bytes(&mut bytes));
		uuid::Builder::from_random_bytes(bytes).into_uuid()
	}

	fn date_time(&self) -> DateTime<Utc> {
		let secs = self.with_rng(|rng| rng.gen_range(DATE_TIME_MIN..DATE_TIME_MAX));
		DateTime::from_timestamp(secs, 0).unwrap_or_default()
	}
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
	if a <= b { (a, b) } else { (b, a) }
}
