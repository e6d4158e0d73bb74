use anyhow::{bail, Result};
use clap::Parser;
use form_render::templates::{self, DEFAULT_PAGE_TEMPLATE};
use form_render::{
    get_form_schema, parse_form_json, render_page, Config, DirSource, FormRenderer, HttpSource,
    PageRender, SchemaSource,
};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "formrender")]
#[command(about = "Render HTML forms from JSON form schemas", long_about = None)]
struct Args {
    /// Read a form schema from this file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Read a form schema from stdin
    #[arg(long)]
    stdin: bool,

    /// Only validate the schema, print "ok" or the error
    #[arg(long)]
    check: bool,

    /// Wrap a rendered schema in a full HTML document
    #[arg(long)]
    standalone: bool,

    /// Render every form anchor of this hosting page
    #[arg(long, value_name = "PATH", conflicts_with_all = ["file", "stdin"])]
    page: Option<PathBuf>,

    /// Load schemas for --page from this directory instead of the endpoint
    #[arg(long, value_name = "DIR", requires = "page")]
    forms_dir: Option<PathBuf>,

    /// Forms endpoint base URL for --page (overrides config)
    #[arg(long, value_name = "URL", requires = "page", conflicts_with = "forms_dir")]
    endpoint: Option<String>,

    /// Path to config file (default: ~/.config/form-render/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the JSON Schema for form documents and exit
    #[arg(long)]
    print_schema: bool,
}

fn read_schema_input(args: &Args) -> Result<String> {
    if let Some(path) = &args.file {
        Ok(fs::read_to_string(path)?)
    } else if args.stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        bail!("Nothing to render: pass --file, --stdin or --page")
    }
}

fn run_schema_mode(args: &Args, config: &Config) -> Result<()> {
    let input = read_schema_input(args)?;
    let form = parse_form_json(&input)?;

    if args.check {
        println!("ok");
        return Ok(());
    }

    let html = FormRenderer::new(config.render.clone()).render_form_html(&form);
    if args.standalone {
        let template = match &config.page_template {
            Some(path) => templates::load_page_template(path)?,
            None => DEFAULT_PAGE_TEMPLATE.to_string(),
        };
        let title = if form.title.is_empty() {
            &form.name
        } else {
            &form.title
        };
        print!("{}", templates::render_document(&template, title, &html)?);
    } else {
        println!("{}", html);
    }
    Ok(())
}

async fn render_with<S: SchemaSource>(page: &str, source: &S, config: &Config) -> PageRender {
    let renderer = FormRenderer::new(config.render.clone());
    render_page(page, source, &renderer).await
}

async fn run_page_mode(args: &Args, mut config: Config) -> Result<()> {
    let Some(page_path) = &args.page else {
        bail!("--page is required");
    };
    let page = fs::read_to_string(page_path)?;

    let render = match &args.forms_dir {
        Some(dir) => {
            let source = DirSource::new(dir, config.endpoint.extension.clone());
            render_with(&page, &source, &config).await
        }
        None => {
            if let Some(url) = &args.endpoint {
                config.endpoint.base_url = url.clone();
            }
            let source = HttpSource::new(&config.endpoint)?;
            render_with(&page, &source, &config).await
        }
    };

    for (anchor, outcome) in &render.outcomes {
        if !outcome.is_rendered() {
            log::warn!("Anchor '{}' rendered as an error placeholder", anchor);
        }
    }
    print!("{}", render.html);
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    if args.print_schema {
        println!("{}", serde_json::to_string_pretty(&get_form_schema())?);
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;

    if args.page.is_some() {
        run_page_mode(&args, config).await
    } else {
        run_schema_mode(&args, &config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    match run(Args::parse()).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error = serde_json::json!({"error": e.to_string()});
            println!("{}", serde_json::to_string(&error)?);
            std::process::exit(1);
        }
    }
}
