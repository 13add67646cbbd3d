use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive story chat (the default when no command is given)
    Chat,

    /// Send a single prompt and print the reply
    Ask {
        /// Prompt text; multiple words are joined with spaces
        #[arg(required = true)]
        prompt: Vec<String>,
    },
}
