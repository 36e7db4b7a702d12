mod cli;
mod info_cmd;
mod objects_cmd;
mod set_info_cmd;

fn main() {
    let cli = cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::ERROR)
        .init();

    let result = match cli.command {
        cli::Commands::Info { ref file } => info_cmd::run(file),
        cli::Commands::Objects { ref file } => objects_cmd::run(file),
        cli::Commands::SetInfo {
            ref file,
            ref out,
            ref title,
            ref author,
            ref subject,
            ref keywords,
        } => set_info_cmd::run(
            file,
            out.as_deref(),
            [
                ("Title", title.as_deref()),
                ("Author", author.as_deref()),
                ("Subject", subject.as_deref()),
                ("Keywords", keywords.as_deref()),
            ],
        ),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
