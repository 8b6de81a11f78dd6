//! Post-generation enhancement pass.

use crate::domain::content::{
    EnhancementFlags, GeneratedContent, InteractionKind, InteractiveElement,
};

/// Applies the requested enhancements and returns the names of those applied.
///
/// With `adaptive_difficulty`, difficulty is clamped to within one step of the
/// learner's preferred difficulty.
pub fn enhance(
    content: &mut GeneratedContent,
    flags: &EnhancementFlags,
    preferred_difficulty: Option<u8>,
) -> Vec<String> {
    let mut applied = Vec::new();

    if flags.include_code_examples {
        let mut added = false;
        for section in content.sections.iter_mut().filter(|s| s.code_example.is_none()) {
            section.code_example = Some(format!(
                "// {}: try it yourself\nfn main() {{\n    println!(\"{}\");\n}}",
                section.heading,
                section.heading.replace('"', "'")
            ));
            added = true;
        }
        if added {
            applied.push("code_examples".to_string());
        }
    }

    if flags.adaptive_difficulty {
        if let Some(preferred) = preferred_difficulty {
            let low = preferred.saturating_sub(1).max(1);
            let high = preferred.saturating_add(1).min(10);
            let clamped = content.difficulty_level.clamp(low, high);
            if clamped != content.difficulty_level {
                content.difficulty_level = clamped;
                applied.push("adaptive_difficulty".to_string());
            }
        }
    }

    if flags.include_interactive {
        let mut added = false;
        for (kind, prompt) in [
            (InteractionKind::Quiz, "Check your understanding"),
            (InteractionKind::Exercise, "Apply the idea to your own project"),
        ] {
            if !content.interactive_elements.iter().any(|e| e.kind == kind) {
                content.interactive_elements.push(InteractiveElement {
                    kind,
                    prompt: format!("{}: {}", prompt, content.title),
                });
                added = true;
            }
        }
        if added {
            applied.push("interactive_elements".to_string());
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::generated::fixtures::sample_content;

    #[test]
    fn no_flags_change_nothing() {
        let mut content = sample_content();
        let before = content.clone();
        let applied = enhance(&mut content, &EnhancementFlags::default(), Some(2));
        assert!(applied.is_empty());
        assert_eq!(content, before);
    }

    #[test]
    fn code_examples_are_added_to_every_section() {
        let mut content = sample_content();
        let flags = EnhancementFlags {
            include_code_examples: true,
            ..Default::default()
        };
        assert_eq!(enhance(&mut content, &flags, None), vec!["code_examples"]);
        assert!(content.sections.iter().all(|s| s.code_example.is_some()));
    }

    #[test]
    fn adaptive_difficulty_clamps_to_preference_window() {
        let mut content = sample_content();
        content.difficulty_level = 9;
        let flags = EnhancementFlags {
            adaptive_difficulty: true,
            ..Default::default()
        };
        enhance(&mut content, &flags, Some(4));
        assert_eq!(content.difficulty_level, 5);

        content.difficulty_level = 1;
        enhance(&mut content, &flags, Some(4));
        assert_eq!(content.difficulty_level, 3);
    }

    #[test]
    fn adaptive_difficulty_without_profile_is_a_no_op() {
        let mut content = sample_content();
        let flags = EnhancementFlags {
            adaptive_difficulty: true,
            ..Default::default()
        };
        assert!(enhance(&mut content, &flags, None).is_empty());
        assert_eq!(content.difficulty_level, 6);
    }

    #[test]
    fn interactive_elements_are_not_duplicated() {
        let mut content = sample_content();
        let flags = EnhancementFlags {
            include_interactive: true,
            ..Default::default()
        };
        enhance(&mut content, &flags, None);
        assert_eq!(content.interactive_elements.len(), 2);
        assert!(enhance(&mut content, &flags, None).is_empty());
        assert_eq!(content.interactive_elements.len(), 2);
    }
}
