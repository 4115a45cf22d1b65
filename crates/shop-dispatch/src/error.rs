use shop_core::{CustomerId, ShopError, SlotIndex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Config(#[from] ShopError),

    #[error("slot {slot} is already occupied by {occupant}")]
    SlotOccupied {
        slot:     SlotIndex,
        occupant: CustomerId,
    },

    #[error("slot {0} is out of range")]
    SlotOutOfRange(SlotIndex),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
