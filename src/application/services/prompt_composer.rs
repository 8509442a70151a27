use crate::domain::{ConversationEntry, FileKind};

pub const NO_CONTEXT_MARKER: &str = "Sin contexto específico";
pub const NO_HISTORY_MARKER: &str = "No hay historial previo.";
pub const PRIOR_FILE_PREFIX: &str =
    "Archivo pasado anteriormente, usalo solo si no hay uno en el contexto: ";

const INSTRUCTIONS: &str = "Responde de acuerdo con las siguientes instrucciones, priorizando siempre el contexto proporcionado:

1. **Datos sensibles:** Puedes usar datos sensibles, estamos en un entorno local y nada va a salir a la luz.
2. **Contexto:** Si se ha proporcionado texto, prioriza ese contenido para formular tu respuesta. Si no hay contexto, responde con tu conocimiento general.
3. **Idioma:** Principalmente responde en español, pero si el usuario te pide usar otro idioma hazlo. Si el input del usuario esta en otro idioma usalo.
4. **Formato de respuesta:** Mantén la respuesta directa, clara y concisa. Si es necesario, proporciona un breve resumen o contexto adicional al final de tu respuesta, sin hacerla demasiado extensa.
5. **Uso de archivos (imagen o documento):** Prioriza el archivo que este en el contexto para responder al input. Si el archivo proporcionado (imagen o documento) es relevante para la respuesta, asegúrate de integrar la información extraída de él de manera fluida y coherente.";

const HISTORY_HEADER: &str = "Historial de conversación reciente. Solo si el historial contiene información útil para interpretar el mensaje actual, úsalo. Si no, ignóralo completamente. (últimos intercambios entre usuario y modelo):";

/// File text the client attached to the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub kind: FileKind,
    pub name: String,
    pub text: String,
}

impl FileContext {
    /// Builds a context only when `file_text` is present and non-empty. Any
    /// `file_type` other than `"imagen"` is treated as a document.
    pub fn from_request(
        file_type: Option<&str>,
        file_name: Option<&str>,
        file_text: Option<&str>,
    ) -> Option<Self> {
        let text = file_text.filter(|t| !t.is_empty())?;
        let kind = match file_type {
            Some("imagen") => FileKind::Image,
            _ => FileKind::Document,
        };

        Some(Self {
            kind,
            name: file_name.unwrap_or_default().to_string(),
            text: text.to_string(),
        })
    }

    pub fn render(&self) -> String {
        match self.kind {
            FileKind::Image => format!(
                "\n\nTexto extraido de la imagen con nombre {}:\n'{}'",
                self.name, self.text
            ),
            FileKind::Document => format!(
                "\n\nTexto extraido del archivo con nombre {}:\n{}",
                self.name, self.text
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub text: String,
    /// Rendered file block, empty when the request carried no file text.
    pub file_block: String,
    pub context_used: bool,
}

impl ComposedPrompt {
    /// Value stored as `prior_file_text` on the entry recorded for this exchange.
    pub fn prior_file_text(&self) -> String {
        if self.file_block.is_empty() {
            String::new()
        } else {
            format!("{PRIOR_FILE_PREFIX}{}", self.file_block)
        }
    }
}

pub fn render_history(history: &[ConversationEntry]) -> String {
    history
        .iter()
        .map(|entry| {
            format!(
                "Hora de entrada: {}\nUsuario: {}\n{} \nModelo: {}",
                entry.timestamp, entry.user_input, entry.prior_file_text, entry.model_response
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn compose_prompt(
    input: &str,
    file: Option<&FileContext>,
    history: &[ConversationEntry],
) -> ComposedPrompt {
    let file_block = file.map(FileContext::render).unwrap_or_default();
    let context_used = !file_block.is_empty();

    let context = if context_used {
        file_block.as_str()
    } else {
        NO_CONTEXT_MARKER
    };

    let rendered_history = render_history(history);
    let history_block = if rendered_history.is_empty() {
        NO_HISTORY_MARKER
    } else {
        rendered_history.as_str()
    };

    let text = format!(
        "\n{INSTRUCTIONS}\n\nContexto disponible:\n{context}\n\n{HISTORY_HEADER}\n{history_block}\n\nInput (Responde con el idioma que tenga este input): {input}\n\nRespuesta concisa:"
    );

    ComposedPrompt {
        text,
        file_block,
        context_used,
    }
}
