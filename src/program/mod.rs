//! Token-metadata program interaction: constants, PDA derivation, account
//! layout, and instruction building.
//!
//! Everything here mirrors the on-chain program exactly; the layouts are
//! written out by hand rather than pulled from a program crate so the
//! update path depends only on the byte format it actually touches.

pub mod constants;
pub mod instructions;
pub mod pda;
pub mod state;

pub use instructions::{build_update_metadata_account_v2_ix, UpdateMetadataAccountV2Args};
pub use pda::get_metadata_pda;
pub use state::{Collection, Creator, Data, DataV2, Metadata, Uses};
