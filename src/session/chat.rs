/// Reply when the user chats before uploading anything.
pub const NO_PLAN_REPLY: &str =
    "Puedo ayudarte a analizar planos arquitectónicos. Por favor, carga un plano para comenzar.";

/// Reply when a plan is loaded.
pub const PLAN_LOADED_REPLY: &str =
    "Tengo el plano cargado. Haz clic en 'Analizar plano' para extraer las coordenadas.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::User => "Tú",
            Self::Assistant => "ArquitectoBot",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Canned reply; the user's text is never inspected.
pub fn canned_reply(has_plan: bool) -> &'static str {
    if has_plan {
        PLAN_LOADED_REPLY
    } else {
        NO_PLAN_REPLY
    }
}

/// Assistant summary appended after a successful analysis.
pub fn analysis_summary(point_count: usize) -> String {
    format!(
        "He analizado el plano y encontrado {} puntos importantes. Aquí está el código para Dynamo.",
        point_count
    )
}
