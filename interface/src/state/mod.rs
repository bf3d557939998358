use solana_address::Address;
use static_assertions::const_assert_eq;

use crate::layout::{
    FieldKind,
    FieldSpec,
    Layout,
    TagWidth,
};

pub mod record;

pub use record::{
    decode,
    StateRecord,
};

pub const COMPACT_STATE_LEN: usize = 2;
pub const LINKED_STATE_LEN: usize = 98;
pub const SEEDED_STATE_LEN: usize = 9;

/// Offset of the owner address in a [`StateVariant::Linked`] account: tag, nonce, linked.
pub const LINKED_OWNER_OFFSET: usize = 1 + 1 + 32;

/// The seed of the program-wide seeded state account.
pub const SEEDED_STATE_SEED: &[u8; 12] = b"example_seed";

/// The lifecycle stage stored in an account's leading tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccountTag {
    /// The account exists but the program hasn't populated it yet.
    Uninitialized,
    /// The program has populated the account; the remaining fields are meaningful.
    Initialized,
    /// A tag value this client doesn't know about.
    Unknown(u64),
}

impl AccountTag {
    #[inline(always)]
    pub const fn raw(self) -> u64 {
        match self {
            AccountTag::Uninitialized => 0,
            AccountTag::Initialized => 1,
            AccountTag::Unknown(raw) => raw,
        }
    }
}

impl From<u64> for AccountTag {
    fn from(raw: u64) -> Self {
        match raw {
            0 => AccountTag::Uninitialized,
            1 => AccountTag::Initialized,
            _ => AccountTag::Unknown(raw),
        }
    }
}

/// The account layouts this client can decode.
///
/// `Linked` and `Seeded` come from two generations of the same program and are incompatible:
/// different tag widths, different fields and different address derivations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[cfg_attr(feature = "client", derive(strum_macros::Display, strum_macros::EnumString))]
#[cfg_attr(feature = "client", strum(serialize_all = "kebab-case"))]
pub enum StateVariant {
    /// `u8` tag and nonce, nothing else.
    Compact,
    /// `u8` tag, nonce, then the linked account, owner and mint addresses. Derived from the
    /// linked account's address.
    Linked,
    /// `u64` tag and nonce. Derived from [`SEEDED_STATE_SEED`].
    Seeded,
}

const NONCE: FieldSpec = FieldSpec {
    name: "nonce",
    kind: FieldKind::U8,
};

const COMPACT_FIELDS: &[FieldSpec] = &[NONCE];

const LINKED_FIELDS: &[FieldSpec] = &[
    NONCE,
    FieldSpec {
        name: "linked",
        kind: FieldKind::Address,
    },
    FieldSpec {
        name: "owner",
        kind: FieldKind::Address,
    },
    FieldSpec {
        name: "mint",
        kind: FieldKind::Address,
    },
];

impl StateVariant {
    pub const fn layout(self) -> Layout {
        match self {
            StateVariant::Compact => Layout::new(TagWidth::U8, COMPACT_FIELDS),
            StateVariant::Linked => Layout::new(TagWidth::U8, LINKED_FIELDS),
            StateVariant::Seeded => Layout::new(TagWidth::U64, COMPACT_FIELDS),
        }
    }

    #[inline(always)]
    pub const fn len(self) -> usize {
        self.layout().len()
    }
}

const_assert_eq!(StateVariant::Compact.len(), COMPACT_STATE_LEN);
const_assert_eq!(StateVariant::Linked.len(), LINKED_STATE_LEN);
const_assert_eq!(StateVariant::Seeded.len(), SEEDED_STATE_LEN);

/// Seeds of the linked state account belonging to `linked`.
#[inline(always)]
pub fn linked_state_seeds(linked: &Address) -> [&[u8]; 1] {
    [linked.as_ref()]
}

/// Seeds of the program-wide seeded state account.
#[inline(always)]
pub fn seeded_state_seeds() -> [&'static [u8]; 1] {
    [SEEDED_STATE_SEED]
}
