//! Menu choices.

use std::str::FromStr;
use ticket_pool_core::PoolKind;

/// Menu text shown before every choice.
pub const MENU: &str = "
--- Ticket System Menu ---

1. Configure Normal Ticket System
2. Configure VIP Ticket System
3. Start Normal Ticket Operation
4. Start VIP Ticket Operation
5. Change Normal Ticket Details
6. Change VIP Ticket Details
7. Normal Ticket Pool Status
8. VIP Ticket Pool Status
9. Stop All Ticket Operation
10. Save Ticket System Configuration
11. Load Ticket System Configuration
12. Exit
13. Show Metrics";

/// One operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Enter a fresh configuration
    Configure(PoolKind),
    /// Start the producer/consumer session
    Start(PoolKind),
    /// Re-enter the configuration of a pool
    ChangeDetails(PoolKind),
    /// Show a status snapshot
    Status(PoolKind),
    /// Stop every running session
    StopAll,
    /// Write both configurations to a file
    Save,
    /// Read both configurations from a file
    Load,
    /// Stop everything and quit
    Exit,
    /// Render runtime metrics
    Metrics,
}

/// Input that is not a menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuParseError {
    /// Not a number at all
    NotANumber,
    /// A number with no menu entry
    UnknownChoice(u32),
}

impl MenuChoice {
    /// Map a menu number to a choice
    #[must_use]
    pub const fn from_number(number: u32) -> Option<Self> {
        use PoolKind::{Normal, Vip};

        Some(match number {
            1 => Self::Configure(Normal),
            2 => Self::Configure(Vip),
            3 => Self::Start(Normal),
            4 => Self::Start(Vip),
            5 => Self::ChangeDetails(Normal),
            6 => Self::ChangeDetails(Vip),
            7 => Self::Status(Normal),
            8 => Self::Status(Vip),
            9 => Self::StopAll,
            10 => Self::Save,
            11 => Self::Load,
            12 => Self::Exit,
            13 => Self::Metrics,
            _ => return None,
        })
    }
}

impl FromStr for MenuChoice {
    type Err = MenuParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u32 = s.trim().parse().map_err(|_| MenuParseError::NotANumber)?;
        Self::from_number(number).ok_or(MenuParseError::UnknownChoice(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_entry_parses() {
        for number in 1..=13 {
            assert!(MenuChoice::from_number(number).is_some(), "{number}");
            assert!(MENU.contains(&format!("{number}. ")));
        }
    }

    #[test]
    fn pool_specific_entries() {
        assert_eq!("4".parse(), Ok(MenuChoice::Start(PoolKind::Vip)));
        assert_eq!(" 7 ".parse(), Ok(MenuChoice::Status(PoolKind::Normal)));
    }

    #[test]
    fn invalid_entries() {
        assert_eq!("0".parse::<MenuChoice>(), Err(MenuParseError::UnknownChoice(0)));
        assert_eq!("14".parse::<MenuChoice>(), Err(MenuParseError::UnknownChoice(14)));
        assert_eq!("exit".parse::<MenuChoice>(), Err(MenuParseError::NotANumber));
    }
}
