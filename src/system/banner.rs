use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

const BANNER_LINES: [&str; 7] = [
    "████████╗ █████╗ ███╗   ███╗██████╗ ███████╗██████╗ ██╗  ██╗",
    "╚══██╔══╝██╔══██╗████╗ ████║██╔══██╗██╔════╝██╔══██╗╚██╗██╔╝",
    "   ██║   ███████║██╔████╔██║██████╔╝█████╗  ██████╔╝ ╚███╔╝ ",
    "   ██║   ██╔══██║██║╚██╔╝██║██╔═══╝ ██╔══╝  ██╔══██╗ ██╔██╗ ",
    "   ██║   ██║  ██║██║ ╚═╝ ██║██║     ███████╗██║  ██║██╔╝ ██╗",
    "   ╚═╝   ╚═╝  ╚═╝╚═╝     ╚═╝╚═╝     ╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝",
    "                                                            ",
];

const COLOR_START: (u8, u8, u8) = (0xff, 0x8a, 0x3d);
const COLOR_MID: (u8, u8, u8) = (0xff, 0x3d, 0x6e);
const COLOR_END: (u8, u8, u8) = (0x9b, 0x4d, 0xff);
const SUBTITLE_RGB: (u8, u8, u8) = (0xff, 0x3d, 0x6e);

/// Prints the banner to stdout. Colors are used only on a terminal.
pub fn print_cli_banner(no_color: bool) {
    let use_color = !no_color && std::io::stdout().is_terminal();
    let denom = BANNER_LINES.len().saturating_sub(1);
    for (idx, line) in BANNER_LINES.iter().enumerate() {
        if use_color {
            let (r, g, b) = tri_gradient_rgb(COLOR_START, COLOR_MID, COLOR_END, idx, denom);
            println!("{}", line.with(Color::Rgb { r, g, b }));
        } else {
            println!("{line}");
        }
    }

    let description = subtitle();
    if use_color {
        println!(
            "{}",
            description.with(Color::Rgb {
                r: SUBTITLE_RGB.0,
                g: SUBTITLE_RGB.1,
                b: SUBTITLE_RGB.2
            })
        );
    } else {
        println!("{description}");
    }
}

fn subtitle() -> String {
    format!(
        "tamperx v{} | {} | HTTP verb tampering",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_LICENSE")
    )
}

fn gradient_rgb(start: (u8, u8, u8), end: (u8, u8, u8), idx: usize, denom: usize) -> (u8, u8, u8) {
    let denom = i32::try_from(denom.max(1)).unwrap_or(i32::MAX);
    let idx = i32::try_from(idx).unwrap_or(i32::MAX).min(denom);
    let lerp = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        let value = b
            .checked_sub(a)
            .and_then(|delta| delta.checked_mul(idx))
            .and_then(|scaled| scaled.checked_div(denom))
            .and_then(|step| a.checked_add(step))
            .unwrap_or(a);
        u8::try_from(value.clamp(0, 255)).unwrap_or(0)
    };
    (
        lerp(start.0, end.0),
        lerp(start.1, end.1),
        lerp(start.2, end.2),
    )
}

fn tri_gradient_rgb(
    start: (u8, u8, u8),
    mid: (u8, u8, u8),
    end: (u8, u8, u8),
    idx: usize,
    denom: usize,
) -> (u8, u8, u8) {
    let denom = denom.max(1);
    let half = denom / 2;
    if idx <= half {
        gradient_rgb(start, mid, idx, half)
    } else {
        gradient_rgb(
            mid,
            end,
            idx.saturating_sub(half),
            denom.saturating_sub(half),
        )
    }
}
