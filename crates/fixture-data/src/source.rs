//! Fake-data sources.
//!
//! Fixture builders draw every random value through [`FakeSource`]. The
//! production implementation wraps the `fake` crate; tests provide their own
//! implementations to pin values.

use fake::Fake;
use fake::faker::internet::raw::SafeEmail;
use fake::faker::lorem::raw::{Paragraph, Word};
use fake::faker::name::raw::Name;
use fake::faker::number::raw::NumberWithFormat;
use fake::locales::EN;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Number of sentences in a generated paragraph (half-open range).
const PARAGRAPH_SENTENCES: std::ops::Range<usize> = 3..6;

/// Format of generated OAuth identifiers; `#` is replaced by a digit.
const IDENTIFIER_FORMAT: &str = "###-##-####";

/// Capability for producing fake field values.
pub trait FakeSource {
    /// A single lorem word.
    fn word(&mut self) -> String;

    /// A paragraph of lorem sentences.
    fn paragraph(&mut self) -> String;

    /// A person's full name.
    fn name(&mut self) -> String;

    /// An email address on a reserved example domain.
    fn email(&mut self) -> String;

    /// An opaque identifier string.
    fn identifier(&mut self) -> String;
}

impl<S: FakeSource + ?Sized> FakeSource for &mut S {
    fn word(&mut self) -> String {
        (**self).word()
    }

    fn paragraph(&mut self) -> String {
        (**self).paragraph()
    }

    fn name(&mut self) -> String {
        (**self).name()
    }

    fn email(&mut self) -> String {
        (**self).email()
    }

    fn identifier(&mut self) -> String {
        (**self).identifier()
    }
}

/// [`FakeSource`] backed by the `fake` crate's English locale.
///
/// The RNG is always seeded: [`FakerSource::seeded`] takes an explicit seed
/// and [`FakerSource::from_random_seed`] draws one, which
/// [`FakerSource::seed`] exposes so a run can be reproduced.
#[derive(Debug, Clone)]
pub struct FakerSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl FakerSource {
    /// Creates a source whose output is fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a source from a seed drawn from the thread RNG.
    #[must_use]
    pub fn from_random_seed() -> Self {
        Self::seeded(rand::random())
    }

    /// Returns the seed this source was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl FakeSource for FakerSource {
    fn word(&mut self) -> String {
        Word(EN).fake_with_rng(&mut self.rng)
    }

    fn paragraph(&mut self) -> String {
        Paragraph(EN, PARAGRAPH_SENTENCES).fake_with_rng(&mut self.rng)
    }

    fn name(&mut self) -> String {
        Name(EN).fake_with_rng(&mut self.rng)
    }

    fn email(&mut self) -> String {
        SafeEmail(EN).fake_with_rng(&mut self.rng)
    }

    fn identifier(&mut self) -> String {
        NumberWithFormat(EN, IDENTIFIER_FORMAT).fake_with_rng(&mut self.rng)
    }
}
