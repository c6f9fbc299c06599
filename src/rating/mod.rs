pub mod awards;
pub mod decay;
pub mod salary;
pub mod tiers;

pub use awards::{award_races, AwardCandidate, AwardCategory, AwardRaces};
pub use decay::{decayed_value, DecayRule, DecayTable, RpSource};
pub use salary::{AwardModifiers, SalaryModel};
pub use tiers::{RankTierTable, TierInfo, TierTable};
