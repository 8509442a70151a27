use minijinja::Environment;

pub const CHAT_PAGE: &str = "index.html";

/// Template environment with the chat page compiled in.
pub fn chat_templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(CHAT_PAGE, include_str!("../../templates/index.html"))?;
    Ok(env)
}
