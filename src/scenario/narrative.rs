// src/scenario/narrative.rs
use super::classify::Scenario;

/// One-line description of how the note terminated, for display only.
pub fn describe(scenario: &Scenario) -> String {
    match scenario {
        Scenario::EarlyKnockOut { knock_out_period } => {
            format!("Knocked out at period {}; the note terminated early", knock_out_period)
        }
        Scenario::MaturityNoEvent => "Matured with neither a knock-out nor a knock-in".to_string(),
        Scenario::KnockInNoKnockOut { knock_in_period } => {
            format!("Matured without a knock-out; knocked in at period {}", knock_in_period)
        }
        Scenario::KnockInThenKnockOut {
            knock_in_period,
            knock_out_period,
        } => format!(
            "Knocked in at period {}, then knocked out at period {}; the note terminated early",
            knock_in_period, knock_out_period
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narratives_name_the_periods() {
        assert!(describe(&Scenario::EarlyKnockOut { knock_out_period: 6 }).contains("period 6"));
        assert!(describe(&Scenario::KnockInNoKnockOut { knock_in_period: 10 }).contains("period 10"));
        let both = describe(&Scenario::KnockInThenKnockOut {
            knock_in_period: 3,
            knock_out_period: 9,
        });
        assert!(both.contains("period 3") && both.contains("period 9"));
        assert!(!describe(&Scenario::MaturityNoEvent).contains('\n'));
    }
}
