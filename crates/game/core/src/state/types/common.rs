use std::fmt;

/// Seat index of a player at the table (0-based, turn order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Identifier of a board node.
///
/// The hub is always `NodeId(0)`; grid cell `(row, col)` maps to
/// `NodeId(1 + row * cols + col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    pub const HUB: Self = Self(0);

    #[inline]
    pub const fn grid(row: u16, col: u16, cols: u16) -> Self {
        Self(1 + row as u32 * cols as u32 + col as u32)
    }

    #[inline]
    pub const fn is_hub(self) -> bool {
        self.0 == Self::HUB.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_hub() {
            f.write_str("hub")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// The two currencies of the economy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Money,
    People,
}

/// Cost attached to a task, in catalog order: money first, then people.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCost {
    pub money: i64,
    pub people: i64,
}

impl ResourceCost {
    pub const fn new(money: i64, people: i64) -> Self {
        Self { money, people }
    }

    /// Share of this cost charged for a selection, floored per resource.
    pub fn fee(&self, percent: i64) -> Self {
        Self {
            money: percent_of(self.money, percent),
            people: percent_of(self.people, percent),
        }
    }

    pub const fn amount(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Money => self.money,
            ResourceKind::People => self.people,
        }
    }
}

/// `floor(amount * percent / 100)`, saturating at the `i64` bounds.
fn percent_of(amount: i64, percent: i64) -> i64 {
    let scaled = (i128::from(amount) * i128::from(percent)).div_euclid(100);
    i64::try_from(scaled).unwrap_or(if scaled < 0 { i64::MIN } else { i64::MAX })
}

/// Balances held by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    pub money: i64,
    pub people: i64,
}

impl ResourcePool {
    pub const fn new(money: i64, people: i64) -> Self {
        Self { money, people }
    }

    /// Returns the first resource whose balance is below the requested amount.
    pub fn shortfall(&self, cost: &ResourceCost) -> Option<ResourceKind> {
        if self.money < cost.money {
            Some(ResourceKind::Money)
        } else if self.people < cost.people {
            Some(ResourceKind::People)
        } else {
            None
        }
    }

    pub fn deduct(&mut self, cost: &ResourceCost) {
        *self = self.after(cost);
    }

    pub fn credit(&mut self, grant: &ResourceCost) {
        self.money = self.money.saturating_add(grant.money);
        self.people = self.people.saturating_add(grant.people);
    }

    /// Returns the first depleted resource (balance ≤ 0), if any.
    pub fn depleted(&self) -> Option<ResourceKind> {
        if self.money <= 0 {
            Some(ResourceKind::Money)
        } else if self.people <= 0 {
            Some(ResourceKind::People)
        } else {
            None
        }
    }

    /// Balances after paying `cost`; may go negative.
    pub const fn after(&self, cost: &ResourceCost) -> Self {
        Self {
            money: self.money.saturating_sub(cost.money),
            people: self.people.saturating_sub(cost.people),
        }
    }
}
