//! Callback payload decoding
//!
//! Every inline button carries a colon-separated payload whose first segment
//! names the flow ("menu", "support", "lead", "hw", "admin"). The payload is
//! decoded once, here, into a tagged enum; handlers match on the enum and
//! never inspect the raw string.

/// Static menu screen requested via a `menu:*` button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Home,
    About,
    Diag,
    Reviews,
    Faq,
}

/// Admin verdict on a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadDecision {
    Approve,
    Reject,
}

/// Admin action on a homework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwAdminAction {
    Accept,
    Rework,
    Comment,
}

/// A decoded inline-button payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Menu(MenuScreen),
    SupportAsk,
    LeadStart,
    LeadClass(String),
    LeadGoal(String),
    LeadTime(String),
    LeadSubmit,
    HwStart,
    HwClass(String),
    HwTopic(String),
    AdminLead { decision: LeadDecision, lead_id: i64 },
    AdminHw { action: HwAdminAction, homework_id: i64 },
}

impl CallbackAction {
    /// Decodes a raw callback payload. Unknown or malformed payloads yield
    /// `None` and are ignored by the router.
    pub fn parse(data: &str) -> Option<Self> {
        let parts: Vec<&str> = data.split(':').collect();
        match parts.as_slice() {
            ["menu", "home"] => Some(CallbackAction::Menu(MenuScreen::Home)),
            ["menu", "about"] => Some(CallbackAction::Menu(MenuScreen::About)),
            ["menu", "diag"] => Some(CallbackAction::Menu(MenuScreen::Diag)),
            ["menu", "reviews"] => Some(CallbackAction::Menu(MenuScreen::Reviews)),
            ["menu", "faq"] => Some(CallbackAction::Menu(MenuScreen::Faq)),
            ["support", "ask"] => Some(CallbackAction::SupportAsk),
            ["lead", "start"] => Some(CallbackAction::LeadStart),
            ["lead", "class", band] => Some(CallbackAction::LeadClass((*band).to_string())),
            ["lead", "goal", code] => Some(CallbackAction::LeadGoal((*code).to_string())),
            ["lead", "time", code] => Some(CallbackAction::LeadTime((*code).to_string())),
            ["lead", "submit"] => Some(CallbackAction::LeadSubmit),
            ["hw", "start"] => Some(CallbackAction::HwStart),
            ["hw", "class", band] => Some(CallbackAction::HwClass((*band).to_string())),
            ["hw", "topic", code] => Some(CallbackAction::HwTopic((*code).to_string())),
            ["admin", "lead", decision, id] => {
                let decision = match *decision {
                    "ok" => LeadDecision::Approve,
                    "no" => LeadDecision::Reject,
                    _ => return None,
                };
                let lead_id = id.parse::<i64>().ok()?;
                Some(CallbackAction::AdminLead { decision, lead_id })
            }
            ["admin", "hw", action, id] => {
                let action = match *action {
                    "accept" => HwAdminAction::Accept,
                    "rework" => HwAdminAction::Rework,
                    "comment" => HwAdminAction::Comment,
                    _ => return None,
                };
                let homework_id = id.parse::<i64>().ok()?;
                Some(CallbackAction::AdminHw { action, homework_id })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_payloads() {
        assert_eq!(CallbackAction::parse("menu:home"), Some(CallbackAction::Menu(MenuScreen::Home)));
        assert_eq!(CallbackAction::parse("menu:faq"), Some(CallbackAction::Menu(MenuScreen::Faq)));
    }

    #[test]
    fn test_parse_lead_steps() {
        assert_eq!(
            CallbackAction::parse("lead:class:1-4"),
            Some(CallbackAction::LeadClass("1-4".to_string()))
        );
        assert_eq!(
            CallbackAction::parse("lead:goal:oge"),
            Some(CallbackAction::LeadGoal("oge".to_string()))
        );
        assert_eq!(
            CallbackAction::parse("lead:time:morning"),
            Some(CallbackAction::LeadTime("morning".to_string()))
        );
        assert_eq!(CallbackAction::parse("lead:submit"), Some(CallbackAction::LeadSubmit));
    }

    #[test]
    fn test_parse_hw_steps() {
        assert_eq!(
            CallbackAction::parse("hw:class:9"),
            Some(CallbackAction::HwClass("9".to_string()))
        );
        assert_eq!(
            CallbackAction::parse("hw:topic:geometry"),
            Some(CallbackAction::HwTopic("geometry".to_string()))
        );
    }

    #[test]
    fn test_parse_admin_payloads() {
        assert_eq!(
            CallbackAction::parse("admin:lead:ok:17"),
            Some(CallbackAction::AdminLead {
                decision: LeadDecision::Approve,
                lead_id: 17,
            })
        );
        assert_eq!(
            CallbackAction::parse("admin:lead:no:17"),
            Some(CallbackAction::AdminLead {
                decision: LeadDecision::Reject,
                lead_id: 17,
            })
        );
        assert_eq!(
            CallbackAction::parse("admin:hw:comment:3"),
            Some(CallbackAction::AdminHw {
                action: HwAdminAction::Comment,
                homework_id: 3,
            })
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(CallbackAction::parse(""), None);
        assert_eq!(CallbackAction::parse("menu:unknown"), None);
        assert_eq!(CallbackAction::parse("lead:class"), None);
        assert_eq!(CallbackAction::parse("admin:lead:maybe:5"), None);
        assert_eq!(CallbackAction::parse("admin:hw:accept:notanumber"), None);
        assert_eq!(CallbackAction::parse("admin:lead:ok"), None);
    }
}
