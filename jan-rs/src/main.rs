use std::io::Read;

use jan::cli::{self, CliArgs, ConfigFile};
use jan::config::{self, ColorMode, Config};
use jan::highlight::Highlighter;
use jan::playground::{OutputView, Playground};
use jan::{render, simulate, snippets};

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("jan: {e}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    if args.list {
        for s in snippets::ALL {
            println!("{:<14}{}", s.name, s.title);
        }
        return;
    }

    let config = load_config(&args.config);

    let code = match read_source(&args, &config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("jan: {e}");
            std::process::exit(1);
        }
    };

    let mut playground = Playground::with_code(code);
    playground.set_highlighter(Highlighter::with_theme(&config.theme));
    let lang = args.language.as_deref().unwrap_or(&config.language);
    playground.set_language(lang);

    if args.highlight {
        let markup = playground.highlighted();
        let out = if args.block {
            render::code_block(&markup, lang, None)
        } else if !args.raw && use_color(config.color) {
            render::ansi(&markup)
        } else {
            markup
        };
        print!("{out}");
        if !out.ends_with('\n') {
            println!();
        }
        return;
    }

    if args.debug {
        // Classification errors surface from run() below.
        if let Ok(records) = simulate::classify(playground.code()) {
            for r in records {
                eprintln!("jan: line {}: {}", r.line, r.class.name());
            }
        }
    }

    playground.run();
    match playground.view() {
        OutputView::Error(msg) => {
            eprintln!("jan: {msg}");
            std::process::exit(1);
        }
        OutputView::Lines(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        OutputView::Placeholder => {}
    }
}

/// Load the user config; problems are warnings, never fatal.
fn load_config(spec: &ConfigFile) -> Config {
    let path = match spec {
        ConfigFile::Skip => return Config::default(),
        ConfigFile::Explicit(p) => Some(p.clone()),
        ConfigFile::Search => config::find_user_config(),
    };
    let Some(path) = path else {
        return Config::default();
    };
    match Config::load_file(&path) {
        Ok((cfg, errors)) => {
            for e in errors {
                eprintln!("jan: warning: {}: {e}", path.display());
            }
            cfg
        }
        Err(e) => {
            eprintln!("jan: warning: {}: {e}", path.display());
            Config::default()
        }
    }
}

/// Source text: `-e` example, else the source file, else stdin.  An
/// interactive stdin gets the configured (or welcome) example instead.
fn read_source(args: &CliArgs, config: &Config) -> Result<String, String> {
    if let Some(name) = &args.example {
        return snippets::find(name)
            .map(|s| s.code.to_owned())
            .ok_or_else(|| format!("unknown example '{name}' (try -x)"));
    }
    if let Some(path) = &args.source {
        return std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()));
    }
    if is_tty(libc::STDIN_FILENO) {
        let name = config.example.as_deref().unwrap_or(snippets::DEFAULT);
        return snippets::find(name)
            .map(|s| s.code.to_owned())
            .ok_or_else(|| format!("unknown example '{name}'"));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("stdin: {e}"))?;
    Ok(buf)
}

fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_tty(libc::STDOUT_FILENO),
    }
}

fn is_tty(fd: libc::c_int) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}
