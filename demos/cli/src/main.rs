use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use timeline_core::{html::render_page, TimelineConfig, TimelineController};
use timeline_data::{parse_config_str, parse_entries_str, sample_config, sample_entries};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "timeline-cli",
    about = "Nhóm, lọc và xuất timeline sự kiện ra HTML tĩnh."
)]
struct Args {
    /// File JSON danh sách entry; bỏ trống để dùng dữ liệu mẫu.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Từ khoá tìm kiếm (không phân biệt hoa thường).
    #[arg(short, long)]
    search: Option<String>,

    /// Tag cần lọc; lặp lại để lọc theo nhiều tag cùng lúc.
    #[arg(short, long = "tag")]
    tags: Vec<String>,

    /// File JSON cấu hình; trường thiếu dùng giá trị mặc định.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ghi trang HTML tĩnh ra đường dẫn này.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("timeline_core=info,timeline_cli=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let (entries, base_config) = match &args.input {
        Some(path) => {
            let data = read_file(path)?;
            let entries = parse_entries_str(&data)
                .with_context(|| format!("Không đọc được entry trong {:?}", path))?;
            (entries, TimelineConfig::default())
        }
        None => (
            sample_entries().context("Dữ liệu mẫu không hợp lệ")?,
            sample_config(),
        ),
    };

    let config = match &args.config {
        Some(path) => parse_config_str(&read_file(path)?)
            .with_context(|| format!("Config không hợp lệ: {:?}", path))?,
        None => base_config,
    };

    let mut controller = TimelineController::with_entries(config, entries);
    if let Some(query) = &args.search {
        controller.search(query);
    }
    for tag in &args.tags {
        if !controller.is_tag_active(tag) {
            controller.toggle_tag_filter(tag);
        }
    }

    let generated_at = Utc::now();
    let rendered = controller.rendered();
    info!(
        query = controller.query(),
        filters = controller.filters().len(),
        "timeline rendered"
    );

    println!(
        "Generated at: {}\nEntries: {}\nRows: {} ({} visible)\nVisible entries: {}",
        generated_at.to_rfc3339(),
        controller.store().len(),
        rendered.rows.len(),
        rendered.visible_rows().count(),
        rendered.visible_box_count()
    );

    if let Some(path) = &args.output {
        let page = render_page(rendered, "Timeline", generated_at);
        std::fs::write(path, page).with_context(|| format!("Không ghi được file {:?}", path))?;
        info!(path = %path.display(), "static page written");
    }

    Ok(())
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Không đọc được file {:?}", path))
}
