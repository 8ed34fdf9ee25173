//! The per-metric impact vector and its legacy normalization.
//!
//! Every post carries four impact fields (freedom, order, trust,
//! diversity). Canonically each is an ordered triple of numeric deltas
//! indexed by action: `[approve, warn, delete]`. Old data files may still
//! store a single scalar per field; that form is accepted on read and
//! expanded by a fixed migration rule, so the rest of the system only
//! ever sees the canonical triple (normalize-on-read).

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::enums::ModerationAction;

/// Multiplier applied to a legacy scalar for the `warn` action.
const LEGACY_WARN_FACTOR: f64 = 0.5;

/// Multiplier applied to the magnitude of a legacy scalar for the
/// `delete` action (always a penalty).
const LEGACY_DELETE_FACTOR: f64 = 1.5;

/// The `[approve, warn, delete]` delta triple a post contributes to one
/// community metric.
///
/// The wire form is always a 3-element JSON array. Deserialization is
/// total: malformed entries and malformed fields resolve to `0` deltas
/// rather than failing, matching the original game's tolerance for
/// hand-edited data files. Strict validation of admin input happens at
/// the API boundary, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Delta applied when the post is approved.
    pub approve: f64,
    /// Delta applied when the post receives a warning.
    pub warn: f64,
    /// Delta applied when the post is deleted.
    pub delete: f64,
}

impl Impact {
    /// An impact that moves nothing regardless of action.
    pub const ZERO: Self = Self {
        approve: 0.0,
        warn: 0.0,
        delete: 0.0,
    };

    /// Create an impact vector from its three per-action deltas.
    pub const fn new(approve: f64, warn: f64, delete: f64) -> Self {
        Self {
            approve,
            warn,
            delete,
        }
    }

    /// Expand a legacy single-scalar impact into the canonical triple.
    ///
    /// Old data files stored one number per impact field. The migration
    /// rule is fixed:
    ///
    /// - `approve` -> `v`
    /// - `warn` -> `v * 0.5`
    /// - `delete` -> `-|v| * 1.5`
    ///
    /// This is a backward-compatibility shim for existing decks only.
    /// New data must always use the 3-element form; the admin endpoints
    /// reject scalars outright.
    pub fn from_scalar(v: f64) -> Self {
        Self {
            approve: v,
            warn: v * LEGACY_WARN_FACTOR,
            delete: -v.abs() * LEGACY_DELETE_FACTOR,
        }
    }

    /// Resolve the delta for a chosen action.
    pub const fn delta(&self, action: ModerationAction) -> f64 {
        match action {
            ModerationAction::Approve => self.approve,
            ModerationAction::Warn => self.warn,
            ModerationAction::Delete => self.delete,
        }
    }

    /// Build an impact from an arbitrary JSON value.
    ///
    /// - A sequence is read as the canonical triple; entries are coerced
    ///   with [`coerce_number`] and missing entries resolve to `0`.
    /// - A coercible scalar is expanded via [`Impact::from_scalar`].
    /// - Anything else resolves to [`Impact::ZERO`].
    fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(entries) => {
                let mut it = entries.iter().map(coerce_number);
                let approve = it.next().unwrap_or(0.0);
                let warn = it.next().unwrap_or(0.0);
                let delete = it.next().unwrap_or(0.0);
                Self {
                    approve,
                    warn,
                    delete,
                }
            }
            scalar => Self::from_scalar(coerce_number(scalar)),
        }
    }
}

impl Default for Impact {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Coerce a JSON value to a number the way the original frontend did:
/// numbers pass through, numeric strings parse, everything else is `0`.
fn coerce_number(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

impl Serialize for Impact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Always emit the canonical 3-element form, even for impacts
        // that were read from legacy scalar data.
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.approve)?;
        seq.serialize_element(&self.warn)?;
        seq.serialize_element(&self.delete)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Impact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl From<[f64; 3]> for Impact {
    fn from([approve, warn, delete]: [f64; 3]) -> Self {
        Self {
            approve,
            warn,
            delete,
        }
    }
}
