use anyhow::{anyhow, Result};
use image::{DynamicImage, GrayImage};
use viuer::{print, Config as ViuerConfig};
use crate::frame::side_by_side;
use std::io::{IsTerminal, Write};

/// Render the original next to the stretched image
pub fn print_comparison(before: &GrayImage, after: &GrayImage) -> Result<()> {
    print_image(&side_by_side(before, after))
}

pub fn print_image(image: &DynamicImage) -> Result<()> {
    let is_tty = std::io::stdout().is_terminal();

    let config = ViuerConfig {
        width: Some(48),
        height: None,
        absolute_offset: false,
        use_kitty: is_tty,
        use_iterm: is_tty,
        use_sixel: is_tty,
        ..Default::default()
    };

    std::io::stdout().flush()
        .map_err(|e| anyhow!("Failed to flush stdout: {e}"))?;

    print(image, &config)
        .map_err(|e| anyhow!("Failed to display image: {e}"))?;

    Ok(())
}
