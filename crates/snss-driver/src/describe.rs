use snss_types::{CoreTransition, Qualifier};

/// Explanation line for a core transition cause.
#[must_use]
pub fn core_transition_text(core: CoreTransition) -> String {
    let text = match core {
        CoreTransition::Link => "User arrived at this page by clicking a link on another page.",
        CoreTransition::Typed => {
            "User typed URL into the Omnibar, or clicked a suggested URL in the Omnibar."
        }
        CoreTransition::AutoBookmark => {
            "User arrived at page through a bookmark or similar (eg. \"most visited\" suggestions on a new tab)."
        }
        CoreTransition::AutoSubframe => {
            "Automatic navigation within a sub frame (eg an embedded ad)."
        }
        CoreTransition::ManualSubframe => "Manual navigation in a sub frame.",
        CoreTransition::Generated => {
            "User selected suggestion from Omnibar (ie. typed part of an address or search term then selected a suggestion which was not a URL)."
        }
        CoreTransition::AutoToplevel => "Start page (or specified as a command line argument).",
        CoreTransition::FormSubmit => {
            "User arrived at this page as a result of submitting a form."
        }
        CoreTransition::Reload => {
            "Page was reloaded; either by clicking the refresh button, hitting F5, hitting enter in the address bar or as result of restoring a previous session."
        }
        CoreTransition::Keyword => {
            "Generated as a result of a keyword search, not using the default search provider (for example using tab-to-search on Wikipedia)."
        }
        CoreTransition::Other(code) => return format!("Transition code {code}."),
    };
    text.to_string()
}

/// Explanation line for a qualifier flag.
#[must_use]
pub fn qualifier_text(qualifier: Qualifier) -> &'static str {
    match qualifier {
        Qualifier::ForwardBack => "User used the back or forward buttons to arrive at this page.",
        Qualifier::FromAddressBar => "User used the address bar to trigger this navigation.",
        Qualifier::HomePage => "User is navigating to the homepage.",
        Qualifier::ChainStart => "The beginning of a navigation chain.",
        Qualifier::ChainEnd => "Last transition in a redirect chain.",
        Qualifier::ClientRedirect => {
            "Transition was a client-side redirect (eg. caused by JavaScript or a meta-tag redirect)."
        }
        Qualifier::ServerRedirect => {
            "Transition was a server-side redirect (ie a redirect specified in the HTTP response header)."
        }
    }
}

/// Line describing the POST data flag.
#[must_use]
pub fn post_data_text(flag: i32) -> String {
    match flag {
        0 => "The page has no POST data.".to_string(),
        1 => "The page has POST data.".to_string(),
        other => format!("POST: {other}"),
    }
}

/// Line describing the user-agent override flag.
#[must_use]
pub fn user_agent_text(flag: i32) -> String {
    match flag {
        0 => "The user-agent was not overridden.".to_string(),
        1 => "The user-agent was overridden.".to_string(),
        other => format!("User-agent: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_have_three_forms() {
        assert_eq!(post_data_text(0), "The page has no POST data.");
        assert_eq!(post_data_text(1), "The page has POST data.");
        assert_eq!(post_data_text(7), "POST: 7");
        assert_eq!(user_agent_text(0), "The user-agent was not overridden.");
        assert_eq!(user_agent_text(1), "The user-agent was overridden.");
        assert_eq!(user_agent_text(-2), "User-agent: -2");
    }

    #[test]
    fn unknown_core_reports_its_code() {
        assert_eq!(core_transition_text(CoreTransition::Other(42)), "Transition code 42.");
    }

    #[test]
    fn every_qualifier_has_text() {
        for q in Qualifier::ALL {
            assert!(!qualifier_text(q).is_empty());
        }
    }
}
