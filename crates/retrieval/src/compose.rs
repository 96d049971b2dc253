/// Appends the document-context trailer to the tenant's system prompt
/// template. A rejected verdict never suppresses the model call; the
/// context is replaced by a fixed "no documents" marker and the
/// template's own instructions decide how the model responds.
pub fn compose_prompt(system_template: &str, context: &str, accepted: bool) -> String {
    let final_context = if accepted && !context.is_empty() {
        context
    } else {
        "Документы пока не загружены"
    };
    format!("{system_template}\n\nДоступная информация из документов:\n{final_context}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_context_lands_in_the_trailer() {
        let prompt = compose_prompt("Ты консьерж отеля.", "Завтрак с 7:00.", true);
        assert!(prompt.starts_with("Ты консьерж отеля.\n\n"));
        assert!(prompt.ends_with("Доступная информация из документов:\nЗавтрак с 7:00."));
    }

    #[test]
    fn rejected_verdict_substitutes_the_marker() {
        let prompt = compose_prompt("Шаблон", "Контекст есть", false);
        assert!(prompt.contains("Документы пока не загружены"));
        assert!(!prompt.contains("Контекст есть"));
    }

    #[test]
    fn empty_context_substitutes_even_when_accepted() {
        let prompt = compose_prompt("Шаблон", "", true);
        assert!(prompt.contains("Документы пока не загружены"));
    }
}
