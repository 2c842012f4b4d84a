//! Built-in keyword tables

/// Section cues that signal agreement language
pub const SECTION_CUES: &[&str] = &[
    "agreement",
    "security deposit",
    "rental period",
    "payment terms",
    "termination",
    "arbitration",
    "jurisdiction",
    "witness",
    "signatory",
    "governing law",
    "parties",
    "definitions",
    "probation period",
    "internship duration",
    "performance",
    "salary",
    "compensation",
    "notice period",
    "work expectations",
    "attendance",
    "leaves",
    "certificate",
    "offer letter",
];

/// Document categories in tie-break order
pub const DOCUMENT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "rental agreement",
        &["rent", "lease", "tenant", "landlord", "security deposit"],
    ),
    (
        "employment contract",
        &["employment", "employee", "employer", "salary", "position"],
    ),
    (
        "service agreement",
        &["service", "provider", "client", "deliverable"],
    ),
    (
        "loan agreement",
        &["loan", "borrower", "lender", "interest rate"],
    ),
    ("nda", &["confidential", "non-disclosure", "secrecy"]),
    (
        "purchase agreement",
        &["purchase", "buy", "sell", "buyer", "seller"],
    ),
    (
        "internship agreement",
        &["internship", "intern", "supervisor", "internship period"],
    ),
];

/// Label returned when no category keyword occurs
pub const FALLBACK_DOCUMENT_TYPE: &str = "general legal document";
