use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DepositId, DomainError, DomainResult, MovementId, ProductId, UserId};

/// Discriminant of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    Entry,
    Exit,
    Transfer,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entry => "ENTRY",
            MovementType::Exit => "EXIT",
            MovementType::Transfer => "TRANSFER",
        }
    }
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for MovementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ENTRY" => Ok(MovementType::Entry),
            "EXIT" => Ok(MovementType::Exit),
            "TRANSFER" => Ok(MovementType::Transfer),
            other => Err(DomainError::validation(format!(
                "unknown movement type '{other}' (expected ENTRY, EXIT or TRANSFER)"
            ))),
        }
    }
}

/// A movement with its required deposits, by construction.
///
/// An `Entry` always has a destination, an `Exit` always has an origin, and a
/// `Transfer` has both, so a persisted movement can never be missing the
/// deposits its type requires.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MovementKind {
    Entry { destination: DepositId },
    Exit { origin: DepositId },
    Transfer { origin: DepositId, destination: DepositId },
}

impl MovementKind {
    /// Assemble a kind from a wire-shaped request: a type discriminant plus
    /// optional origin/destination ids. Fails with a validation error when a
    /// deposit the type requires is absent.
    pub fn from_parts(
        movement_type: MovementType,
        origin: Option<DepositId>,
        destination: Option<DepositId>,
    ) -> DomainResult<Self> {
        match movement_type {
            MovementType::Entry => {
                let destination = destination.ok_or_else(|| {
                    DomainError::validation("destination deposit is required for ENTRY")
                })?;
                Ok(MovementKind::Entry { destination })
            }
            MovementType::Exit => {
                let origin = origin.ok_or_else(|| {
                    DomainError::validation("origin deposit is required for EXIT")
                })?;
                Ok(MovementKind::Exit { origin })
            }
            MovementType::Transfer => match (origin, destination) {
                (Some(origin), Some(destination)) => Ok(MovementKind::Transfer {
                    origin,
                    destination,
                }),
                _ => Err(DomainError::validation(
                    "both origin and destination deposits are required for TRANSFER",
                )),
            },
        }
    }

    pub fn movement_type(&self) -> MovementType {
        match self {
            MovementKind::Entry { .. } => MovementType::Entry,
            MovementKind::Exit { .. } => MovementType::Exit,
            MovementKind::Transfer { .. } => MovementType::Transfer,
        }
    }

    pub fn origin(&self) -> Option<DepositId> {
        match self {
            MovementKind::Entry { .. } => None,
            MovementKind::Exit { origin } => Some(*origin),
            MovementKind::Transfer { origin, .. } => Some(*origin),
        }
    }

    pub fn destination(&self) -> Option<DepositId> {
        match self {
            MovementKind::Entry { destination } => Some(*destination),
            MovementKind::Exit { .. } => None,
            MovementKind::Transfer { destination, .. } => Some(*destination),
        }
    }
}

/// An immutable record of an action against the stock ledger.
///
/// The quantity is recorded for audit purposes only; ledger housekeeping is
/// driven by row presence, not by this number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMovement {
    pub id: MovementId,
    pub kind: MovementKind,
    pub product_id: ProductId,
    pub quantity: i64,
    pub moved_at: DateTime<Utc>,
    pub user_id: Option<UserId>,
}

impl StockMovement {
    pub fn movement_type(&self) -> MovementType {
        self.kind.movement_type()
    }

    pub fn origin(&self) -> Option<DepositId> {
        self.kind.origin()
    }

    pub fn destination(&self) -> Option<DepositId> {
        self.kind.destination()
    }
}
