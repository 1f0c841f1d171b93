use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MuscleGroup {
    pub name: &'static str,
    pub display_name: &'static str,
}

pub const MUSCLE_GROUPS: &[MuscleGroup] = &[
    MuscleGroup { name: "chest", display_name: "Chest" },
    MuscleGroup { name: "back", display_name: "Back" },
    MuscleGroup { name: "shoulders", display_name: "Shoulders" },
    MuscleGroup { name: "biceps", display_name: "Biceps" },
    MuscleGroup { name: "triceps", display_name: "Triceps" },
    MuscleGroup { name: "legs", display_name: "Legs" },
    MuscleGroup { name: "abs", display_name: "Abs" },
    MuscleGroup { name: "glutes", display_name: "Glutes" },
    MuscleGroup { name: "cardio", display_name: "Cardio" },
];

pub fn is_valid(name: &str) -> bool {
    MUSCLE_GROUPS.iter().any(|g| g.name == name)
}

/// Display label for a stored key, falling back to the key itself.
pub fn display_name(name: &str) -> &str {
    MUSCLE_GROUPS
        .iter()
        .find(|g| g.name == name)
        .map(|g| g.display_name)
        .unwrap_or(name)
}

/// One `<option>` of a muscle group picker.
#[derive(Debug, Clone)]
pub struct MuscleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn options(selected: Option<&str>) -> Vec<MuscleOption> {
    MUSCLE_GROUPS
        .iter()
        .map(|g| MuscleOption {
            value: g.name,
            label: g.display_name,
            selected: selected == Some(g.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(is_valid("chest"));
        assert!(is_valid("cardio"));
        assert!(!is_valid("Chest"));
        assert!(!is_valid(""));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("glutes"), "Glutes");
        assert_eq!(display_name("forearms"), "forearms");
    }

    #[test]
    fn test_options_mark_selection() {
        let opts = options(Some("legs"));
        assert_eq!(opts.len(), MUSCLE_GROUPS.len());
        assert_eq!(opts.iter().filter(|o| o.selected).count(), 1);
        assert!(opts.iter().find(|o| o.value == "legs").unwrap().selected);
        assert!(options(None).iter().all(|o| !o.selected));
    }
}
