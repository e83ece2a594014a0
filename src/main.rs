use clap::Parser;
use instagen::{
    logger::{self, LoggerConfig},
    Config, ContentRequest, ImageReference, Post, Studio, Style,
};
use std::fs;

/// InstaGen - captions, hashtags and an image for one prompt.
#[derive(Parser, Debug)]
#[command(name = "instagen")]
#[command(about = "Generate an Instagram caption, hashtags and image from a description", long_about = None)]
#[command(version)]
struct Cli {
    /// Visual style: realistic, artistic, cartoon, vintage or modern
    #[arg(short, long)]
    style: Option<Style>,

    /// Description of the post
    prompt: Vec<String>,
}

impl Cli {
    fn request(&self) -> ContentRequest {
        let mut request = ContentRequest::new(self.prompt.join(" "));
        request.style = self.style;
        request
    }
}

fn print_post(post: &Post) {
    println!("📂 Category: {}", post.content.category);
    println!("{}", post.content.bundle.to_download_text());
    println!();
    println!(
        "🖼️  Image source: {} (seed {})",
        post.image.source, post.image.seed
    );
}

fn save_image(post: &Post) -> std::io::Result<()> {
    match &post.image.reference {
        ImageReference::Inline { data, .. } => {
            let path = format!(
                "generated_{}.{}",
                post.image.seed,
                post.image.reference.file_extension()
            );
            fs::write(&path, data)?;
            println!("💾 Image written to {}", path);
        }
        ImageReference::Uri { uri } => println!("🔗 Image URL: {}", uri),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if !dotenv_loaded {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let request = Cli::parse().request();

    let config = Config::from_env();
    logger::log_config_info(&config);

    log::info!("🔄 Creating studio...");
    let studio = match Studio::new(config).await {
        Ok(studio) => studio,
        Err(e) => {
            log::error!("❌ Failed to initialize studio: {}", e);
            return Err(e.into());
        }
    };

    let post = studio.create_post(&request).await?;
    print_post(&post);
    save_image(&post)?;

    let stats = studio.history_stats().await?;
    log::info!(
        "📚 History now holds {} images and {} contents",
        stats.images,
        stats.contents
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_prompt_and_style() {
        let cli = Cli::try_parse_from(["instagen", "sunset", "--style", "Vintage", "beach"]).unwrap();
        let request = cli.request();
        assert_eq!(request.raw_text, "sunset beach");
        assert_eq!(request.style, Some(Style::Vintage));

        let cli = Cli::try_parse_from(["instagen", "-s", "cartoon", "cat"]).unwrap();
        assert_eq!(cli.style, Some(Style::Cartoon));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Cli::try_parse_from(["instagen", "--style"]).is_err());
        assert!(Cli::try_parse_from(["instagen", "--style", "neon", "cat"]).is_err());
        let help = Cli::try_parse_from(["instagen", "-h"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_no_words_is_empty_prompt() {
        let request = Cli::try_parse_from(["instagen"]).unwrap().request();
        assert!(request.raw_text.is_empty());
        assert!(request.style.is_none());
    }
}
