//! Short code and record id generation.
//!
//! Codes are drawn from the operating system's CSPRNG and rendered as URL-safe
//! base64 without padding, so every character is in `A-Z a-z 0-9 - _`.
//! Uniqueness against stored records is enforced by the store at insertion
//! time via [`allocate_unique_code`].

use crate::error::AppError;
use base64::Engine as _;

/// Random bytes behind a short code. 6 bytes encode to exactly 8 characters.
const CODE_LENGTH_BYTES: usize = 6;

/// Length of a generated short code.
pub const CODE_LENGTH: usize = 8;

/// Random bytes behind a record id (22 characters once encoded).
const ID_LENGTH_BYTES: usize = 16;

/// Maximum number of generated codes tried before giving up on an insertion.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Source of candidate short codes.
///
/// The store asks its generator for candidates until one is free, so tests can
/// plug in deterministic generators to exercise collision handling.
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate short code.
    fn generate(&self) -> String;
}

/// Default generator backed by [`generate_code`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a cryptographically secure random 8-character short code.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    random_token::<CODE_LENGTH_BYTES>()
}

/// Generates a random record id.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_id() -> String {
    random_token::<ID_LENGTH_BYTES>()
}

fn random_token<const N: usize>() -> String {
    let mut buffer = [0u8; N];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Draws codes from `generator` until `is_taken` reports a free one.
///
/// # Errors
///
/// Returns [`AppError::GenerationExhausted`] after [`MAX_CODE_ATTEMPTS`]
/// consecutive collisions.
pub fn allocate_unique_code(
    generator: &dyn CodeGenerator,
    is_taken: impl Fn(&str) -> bool,
) -> Result<String, AppError> {
    for attempt in 1..=MAX_CODE_ATTEMPTS {
        let code = generator.generate();

        if !is_taken(&code) {
            return Ok(code);
        }

        tracing::warn!(attempt, code = %code, "Short code collision, regenerating");
    }

    tracing::error!(
        attempts = MAX_CODE_ATTEMPTS,
        "Short code generation exhausted"
    );

    Err(AppError::GenerationExhausted {
        attempts: MAX_CODE_ATTEMPTS,
    })
}
