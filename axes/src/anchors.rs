//! Anchor texts.
//!
//! Each anchor is a short, hand-written paragraph embodying one semantic
//! pole. They are never derived from the documents being compared.

/// Present-oriented temporal emphasis: current capabilities, ongoing work,
/// immediate priorities.
pub const PRESENT: &str = concat!(
    "Our current capabilities and ongoing work guide the priorities we address now. ",
    "Existing processes and established practices form the basis for actions underway. ",
    "We focus on what the organisation delivers today and the tasks in progress. ",
    "Present commitments shape the immediate steps we take."
);

/// Future-oriented temporal emphasis: emerging possibilities, upcoming
/// developments, long-term evolution.
pub const FUTURE: &str = concat!(
    "We prepare for emerging possibilities that extend beyond current activity. ",
    "Upcoming developments shape the direction we envision over time. ",
    "Future goals influence how we anticipate the organisation evolving. ",
    "Long-term priorities point toward capabilities we aim to develop."
);

/// Present capabilities and operational feasibility.
pub const OPERATIONAL_GROUNDING: &str = concat!(
    "Our current capabilities and ongoing activities form the basis for the priorities we put forward. ",
    "Existing processes, resources, and areas of expertise support the work already in progress. ",
    "We focus on actions that can be implemented within today's structures. ",
    "Our direction builds on what the organisation can deliver in practice at present."
);

/// Future ambitions beyond current capabilities.
pub const TRANSFORMATIONAL_VISION: &str = concat!(
    "We aim to explore new directions that extend beyond our current capabilities. ",
    "Emerging opportunities shape the areas we prepare to develop over time. ",
    "Future priorities influence how we envision the organisation evolving. ",
    "Our long-term direction points toward roles and outcomes that require growth beyond what we do today."
);
