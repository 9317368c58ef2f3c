use std::fmt;
use std::str::FromStr;

use hello_rpc_core::error::RpcError;
use hello_rpc_core::{EnumDef, Enumeration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl PartOfDay {
    pub const ALL: [PartOfDay; 4] = [
        PartOfDay::Morning,
        PartOfDay::Afternoon,
        PartOfDay::Evening,
        PartOfDay::Night,
    ];
}

impl Enumeration for PartOfDay {
    const DEF: EnumDef = EnumDef {
        name: "PartOfDay",
        tokens: &["morning", "afternoon", "evening", "night"],
    };

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "morning" => Some(PartOfDay::Morning),
            "afternoon" => Some(PartOfDay::Afternoon),
            "evening" => Some(PartOfDay::Evening),
            "night" => Some(PartOfDay::Night),
            _ => None,
        }
    }

    fn token(self) -> &'static str {
        match self {
            PartOfDay::Morning => "morning",
            PartOfDay::Afternoon => "afternoon",
            PartOfDay::Evening => "evening",
            PartOfDay::Night => "night",
        }
    }
}

impl fmt::Display for PartOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for PartOfDay {
    type Err = RpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| {
            RpcError::InvalidInput(format!("{s:?} is not a valid {}", Self::DEF.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip_and_match_def() {
        for (p, t) in PartOfDay::ALL.iter().zip(PartOfDay::DEF.tokens) {
            assert_eq!(p.token(), *t);
            assert_eq!(t.parse::<PartOfDay>().unwrap(), *p);
        }
    }

    #[test]
    fn rejects_outside_the_set() {
        assert!(matches!(
            "noon".parse::<PartOfDay>(),
            Err(RpcError::InvalidInput(_))
        ));
        assert!("Morning".parse::<PartOfDay>().is_err());
    }
}
