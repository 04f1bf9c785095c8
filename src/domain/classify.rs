// Classification rules for server notifications: state changes, display tags, suppression.

use super::state::StateMutation;

/// Top-level `status` of a server notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Data,
    Game,
    Ok,
    Error,
    // Missing, non-string or unrecognized status values.
    Unknown,
}

impl Status {
    pub fn parse(value: &str) -> Self {
        match value {
            "data" => Status::Data,
            "game" => Status::Game,
            "OK" => Status::Ok,
            "ERROR" => Status::Error,
            _ => Status::Unknown,
        }
    }
}

/// Display tag attached to every echoed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Green,
    Orange,
    Red,
    Purple,
    Blue,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tag: ColorTag,
    pub mutation: Option<StateMutation>,
    // Suppressed notifications are neither echoed nor applied.
    pub suppressed: bool,
}

/// Classifies a notification by its `(status, action)` pair.
///
/// Never fails: anything unrecognized degrades to a neutral, non-mutating classification.
pub fn classify(status: Status, action: Option<&str>) -> Classification {
    // Movement updates are far too frequent to echo.
    if status == Status::Data && action == Some("move") {
        return Classification {
            tag: ColorTag::Neutral,
            mutation: None,
            suppressed: true,
        };
    }

    let mutation = match (status, action) {
        (Status::Game, Some("start")) => Some(StateMutation::Activate),
        (Status::Game, Some("over")) => Some(StateMutation::Deactivate),
        _ => None,
    };

    Classification {
        tag: color_tag(status, action),
        mutation,
        suppressed: false,
    }
}

fn color_tag(status: Status, action: Option<&str>) -> ColorTag {
    match status {
        Status::Data => match action {
            Some("spawn") => ColorTag::Green,
            Some("destroy") => ColorTag::Orange,
            _ => ColorTag::Neutral,
        },
        Status::Error => ColorTag::Red,
        Status::Ok => ColorTag::Purple,
        Status::Game => ColorTag::Blue,
        Status::Unknown => ColorTag::Neutral,
    }
}
