use crate::domain::{InferenceRequest, Prompt};

/// Fixed identity and domain scope of the assistant, sent as the system
/// message of every completion.
pub const PERSONA_INSTRUCTION: &str = "Actua como Galatea la asistente de la clinica Odontologica OMARDENT y resuelve las inquietudes";

const CONTEXT_LABEL: &str = "Contexto:";

/// Builds the prompt for one turn. The document context, when present,
/// follows the question under an explicit label so the model can tell the
/// instruction from the background text. Nothing is truncated here.
pub fn assemble_prompt(request: &InferenceRequest) -> Prompt {
    let user_content = if request.context.is_empty() {
        request.question.clone()
    } else {
        format!(
            "{}\n\n{} {}",
            request.question, CONTEXT_LABEL, request.context
        )
    };

    Prompt {
        system_instruction: PERSONA_INSTRUCTION.to_string(),
        user_content,
    }
}
