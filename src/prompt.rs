/// Instruction embedded at the top of every composed prompt. Answers must come
/// from the supplied context only, in Arabic, with a fixed fallback sentence
/// when the context is insufficient.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant. Answer the user's question ONLY using the provided CONTEXT. \nReply in Arabic. If the answer cannot be found in the context, say:\n\"عذرًا، لا أستطيع العثور على معلومات كافية في الملف.\"";

/// Short system-role message sent alongside the composed prompt, reinforcing
/// the same constraint.
pub const SYSTEM_ROLE_MESSAGE: &str =
    "You are a helpful assistant that answers in Arabic using only the provided context.";

/// Renders retrieval chunks as numbered `[CONTEXT n]` blocks separated by
/// blank lines, preserving their original order. Empty input renders empty.
fn render_context(chunks: &[String]) -> String {
    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| format!("[CONTEXT {}]\n{}", i + 1, chunk))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Composes the full user prompt: fixed instruction, context section, the
/// literal question, and a closing reminder to answer only from the context.
pub fn compose_prompt(chunks: &[String], question: &str) -> String {
    format!(
        "{}\n\nCONTEXT:\n{}\n\nUSER QUESTION:\n{}\n\nAnswer only from the context above.",
        SYSTEM_INSTRUCTION,
        render_context(chunks),
        question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_blocks_keep_original_order() {
        let chunks = vec![
            "first snippet".to_string(),
            "second snippet".to_string(),
            "third snippet".to_string(),
        ];
        let prompt = compose_prompt(&chunks, "What is covered?");

        let p1 = prompt.find("[CONTEXT 1]\nfirst snippet").unwrap();
        let p2 = prompt.find("[CONTEXT 2]\nsecond snippet").unwrap();
        let p3 = prompt.find("[CONTEXT 3]\nthird snippet").unwrap();
        assert!(p1 < p2 && p2 < p3);

        assert_eq!(prompt.matches("[CONTEXT ").count(), 3);
        assert!(prompt.contains("USER QUESTION:\nWhat is covered?"));
        assert!(p3 < prompt.find("USER QUESTION:").unwrap());
    }

    #[test]
    fn empty_context_still_has_instruction_and_question() {
        let prompt = compose_prompt(&[], "Anything in here?");

        assert!(prompt.starts_with(SYSTEM_INSTRUCTION));
        assert!(prompt.contains("CONTEXT:\n\n\nUSER QUESTION:\nAnything in here?"));
        assert_eq!(prompt.matches("[CONTEXT ").count(), 0);
        assert!(prompt.ends_with("Answer only from the context above."));
    }

    #[test]
    fn single_chunk_refund_scenario() {
        let chunks = vec!["Refunds within 30 days.".to_string()];
        let prompt = compose_prompt(&chunks, "What is the refund policy?");

        assert!(prompt.contains("[CONTEXT 1]\nRefunds within 30 days."));
        assert!(prompt.contains("What is the refund policy?"));
    }
}
