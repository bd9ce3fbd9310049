//! Portal route table.
//!
//! Patterns are literal segments, `:param` segments and a trailing `*` that
//! swallows the rest of the path. When several patterns match, the most
//! specific wins: literal beats parameter, and parameter beats wildcard.
//! Anything unmatched resolves to [`Page::NotFound`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Register,
    Login,
    Announcements,
    AnnouncementDetail,
    AnnouncementSubmit,
    PermanentRegistration,
    ProvisionalRegistration,
    AdditionalRegistration,
    CategoryMapping,
    CommitteeProfessionMapping,
    QualificationProfessionManagement,
    RegistrationProcessMapping,
    RelaxationFeeConfig,
    PaymentConfig,
    UserRoleMapping,
    ProposalSubmission,
    ProfessionIcons,
    NotFound,
}

pub const ROUTES: &[(&str, Page)] = &[
    ("/", Page::Home),
    ("/register", Page::Register),
    ("/login", Page::Login),
    ("/announcements", Page::Announcements),
    ("/announcements/submit", Page::AnnouncementSubmit),
    ("/announcements/:id", Page::AnnouncementDetail),
    ("/permanent-registration", Page::PermanentRegistration),
    ("/provisional-registration", Page::ProvisionalRegistration),
    ("/additional-registration", Page::AdditionalRegistration),
    ("/category-subcategory-profession-mapping", Page::CategoryMapping),
    ("/committee-profession-mapping", Page::CommitteeProfessionMapping),
    ("/qualification-profession-management", Page::QualificationProfessionManagement),
    ("/registration-process-mapping/*", Page::RegistrationProcessMapping),
    ("/relaxation-fee-config/*", Page::RelaxationFeeConfig),
    ("/payment-config/*", Page::PaymentConfig),
    ("/user-role-mapping/*", Page::UserRoleMapping),
    ("/proposal-submission", Page::ProposalSubmission),
    ("/profession-icons", Page::ProfessionIcons),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub page: Page,
    pub pattern: Option<&'static str>,
    pub params: Vec<(String, String)>,
    /// Remainder captured by a trailing `*`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Match one pattern; returns the match and its specificity score.
fn match_pattern(pattern: &'static str, page: Page, path: &[&str]) -> Option<(RouteMatch, u32)> {
    let parts = segments(pattern);
    let mut params = Vec::new();
    let mut score = 0u32;

    for (i, part) in parts.iter().enumerate() {
        if *part == "*" {
            let rest = path.get(i..).unwrap_or_default().join("/");
            return Some((
                RouteMatch {
                    page,
                    pattern: Some(pattern),
                    params,
                    rest: Some(rest),
                },
                score,
            ));
        }
        let segment = path.get(i)?;
        if let Some(name) = part.strip_prefix(':') {
            params.push((name.to_string(), segment.to_string()));
            score += 2;
        } else if part == segment {
            score += 3;
        } else {
            return None;
        }
    }

    if parts.len() != path.len() {
        return None;
    }
    Some((
        RouteMatch {
            page,
            pattern: Some(pattern),
            params,
            rest: None,
        },
        score + 1,
    ))
}

/// Resolve a browser path. Query strings, fragments and trailing slashes
/// are ignored.
pub fn resolve(path: &str) -> RouteMatch {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = segments(path);

    ROUTES
        .iter()
        .filter_map(|(pattern, page)| match_pattern(pattern, *page, &path))
        .max_by_key(|(_, score)| *score)
        .map(|(found, _)| found)
        .unwrap_or(RouteMatch {
            page: Page::NotFound,
            pattern: None,
            params: Vec::new(),
            rest: None,
        })
}
