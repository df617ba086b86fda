//! The escalation table.
//!
//! | n  | status | label              | effect                  |
//! |----|--------|--------------------|-------------------------|
//! | 1  | 200    | OK                 | none                    |
//! | 2  | 400    | Annoyed            | none                    |
//! | 3  | 400    | Upset              | none                    |
//! | 4  | 500    | Enraged / Failed   | delete the store file   |
//! | 5  | 503    | Fatal              | schedule termination    |
//! | >5 | 500    | Overloaded         | schedule termination    |
//!
//! `n` is the count after incrementing. Everything the escalator says lives in
//! the constants below; [`row_for`] only selects one.

/// Side effect attached to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEffect {
    None,
    /// Try to delete the store file. The row's own label applies on success,
    /// `on_failure` replaces the whole row otherwise.
    DestroyStore { on_failure: &'static ResponseRow },
    /// Schedule process termination.
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRow {
    pub status: u16,
    pub label: &'static str,
    pub message: &'static str,
    pub effect: RowEffect,
}

pub const FRESH: ResponseRow = ResponseRow {
    status: 200,
    label: "OK",
    message: "Hello! I am a brand new GOAT. Everything is fine.",
    effect: RowEffect::None,
};

pub const ANNOYED: ResponseRow = ResponseRow {
    status: 400,
    label: "Annoyed",
    message: "Why are you calling me again?",
    effect: RowEffect::None,
};

pub const UPSET: ResponseRow = ResponseRow {
    status: 400,
    label: "Upset",
    message: "You are hurting my feelings, I feel sick.",
    effect: RowEffect::None,
};

pub const DESTROY_FAILED: ResponseRow = ResponseRow {
    status: 500,
    label: "Failed",
    message: "I tried to delete the database, but it was already gone.",
    effect: RowEffect::None,
};

pub const ENRAGED: ResponseRow = ResponseRow {
    status: 500,
    label: "Enraged",
    message: "That is it! I have deleted the database. Good luck now.",
    effect: RowEffect::DestroyStore {
        on_failure: &DESTROY_FAILED,
    },
};

pub const FATAL: ResponseRow = ResponseRow {
    status: 503,
    label: "Fatal",
    message: "You have called me one time too many. Goodbye.",
    effect: RowEffect::Terminate,
};

pub const OVERLOADED: ResponseRow = ResponseRow {
    status: 500,
    label: "Overloaded",
    message: "I have had enough. I am shutting down.",
    effect: RowEffect::Terminate,
};

/// Row for invocation `n`. The counter never hands out 0; it maps to the
/// first row.
pub fn row_for(n: u64) -> &'static ResponseRow {
    match n {
        0 | 1 => &FRESH,
        2 => &ANNOYED,
        3 => &UPSET,
        4 => &ENRAGED,
        5 => &FATAL,
        _ => &OVERLOADED,
    }
}
