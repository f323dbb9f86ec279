//! Radio bearer identifier mapping
//!
//! Fixed translation between core-network E-RAB ids and the access-stratum
//! identifiers: E-RAB 5 is carried on DRB 1, which uses logical channel 3.
//! LCIDs 1 and 2 belong to SRB1 and SRB2.
//!
//! The mapping functions are only defined for E-RAB ids at or above
//! [`MIN_ERAB_ID`]; callers validate with [`is_valid_erab_id`] first.

/// E-RAB identifier (S1AP)
pub type ErabId = u8;
/// Data radio bearer identity
pub type DrbId = u8;
/// Signalling radio bearer identity
pub type SrbId = u8;
/// Logical channel identity
pub type Lcid = u8;

/// Lowest E-RAB id that can be mapped onto a DRB
pub const MIN_ERAB_ID: ErabId = 5;
/// SRB1 identity
pub const SRB1: SrbId = 1;
/// SRB2 identity
pub const SRB2: SrbId = 2;

const ERAB_TO_DRB_OFFSET: u8 = 4;
const ERAB_TO_LCID_OFFSET: u8 = 2;

/// Returns true if the E-RAB id can be mapped onto a DRB
pub fn is_valid_erab_id(erab_id: ErabId) -> bool {
    erab_id >= MIN_ERAB_ID
}

/// Returns true for SRB1 and SRB2
pub fn is_valid_srb_id(srb_id: SrbId) -> bool {
    srb_id == SRB1 || srb_id == SRB2
}

/// Maps an E-RAB id onto its DRB identity
#[inline]
pub fn erab_to_drb(erab_id: ErabId) -> DrbId {
    debug_assert!(is_valid_erab_id(erab_id), "E-RAB id {erab_id} below minimum");
    erab_id - ERAB_TO_DRB_OFFSET
}

/// Maps an E-RAB id onto its logical channel
#[inline]
pub fn erab_to_lcid(erab_id: ErabId) -> Lcid {
    debug_assert!(is_valid_erab_id(erab_id), "E-RAB id {erab_id} below minimum");
    erab_id - ERAB_TO_LCID_OFFSET
}

/// Maps a DRB identity back onto its E-RAB id
#[inline]
pub fn drb_to_erab(drb_id: DrbId) -> ErabId {
    drb_id + ERAB_TO_DRB_OFFSET
}

/// Maps a DRB identity onto its logical channel
#[inline]
pub fn drb_to_lcid(drb_id: DrbId) -> Lcid {
    drb_id + (ERAB_TO_DRB_OFFSET - ERAB_TO_LCID_OFFSET)
}
