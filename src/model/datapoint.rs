//! Datapoint action table: which control actions a leaf offers, keyed by
//! datapoint main type.
//!
//! Each action is a (label, URL suffix) pair. The suffix is appended to the
//! leaf's action URL, e.g. `http://gw:1234/1/2/3` + `-an`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatapointAction {
    pub label: &'static str,
    pub suffix: &'static str,
}

const fn action(label: &'static str, suffix: &'static str) -> DatapointAction {
    DatapointAction { label, suffix }
}

/// Ordered; two actions per defined type.
const ACTION_TABLE: &[(u16, &[DatapointAction])] = &[
    (1, &[action("on", "-an"), action("off", "-aus")]),
    (3, &[action("increase", "-plus"), action("decrease", "-minus")]),
];

/// Actions for a datapoint main type, or None if the type has no entry.
pub fn actions_for(main: u16) -> Option<&'static [DatapointAction]> {
    ACTION_TABLE
        .iter()
        .find(|(t, _)| *t == main)
        .map(|(_, actions)| *actions)
}

/// Known datapoint main types. Only used to make log lines readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatapointKind {
    Binary,
    StepCode,
    UnsignedValue,
}

impl DatapointKind {
    pub fn from_main(main: u16) -> Option<Self> {
        match main {
            1 => Some(Self::Binary),
            3 => Some(Self::StepCode),
            5 => Some(Self::UnsignedValue),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::StepCode => "step_code",
            Self::UnsignedValue => "unsigned_value",
        }
    }
}

pub fn binary_subtype_name(sub: u16) -> Option<&'static str> {
    Some(match sub {
        1 => "on_off",
        2 => "false_true",
        3 => "enable_disable",
        5 => "alarm_no_alarm",
        7 => "increase_decrease",
        8 => "up_down",
        9 => "open_close",
        10 => "start_stop",
        11 => "state",
        19 => "window_door",
        _ => return None,
    })
}

/// Human-readable form for logs: "1.001 (binary/on_off)", "99 (unknown)".
pub fn describe(main: Option<u16>, sub: Option<u16>) -> String {
    let Some(main) = main else {
        return "? (no main type)".to_string();
    };
    let code = match sub {
        Some(s) => format!("{}.{:03}", main, s),
        None => main.to_string(),
    };
    let kind = match DatapointKind::from_main(main) {
        Some(k) => k.name(),
        None => return format!("{} (unknown)", code),
    };
    match (kind, sub.and_then(binary_subtype_name)) {
        ("binary", Some(subname)) => format!("{} ({}/{})", code, kind, subname),
        _ => format!("{} ({})", code, kind),
    }
}
