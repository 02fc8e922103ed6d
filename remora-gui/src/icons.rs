use iced::widget::{Svg, svg};
use include_dir::{Dir, include_dir};

static ICONS: Dir = include_dir!("$CARGO_MANIFEST_DIR/icons");

/// Look up a bundled SVG icon by name.
pub fn icon<'a>(name: &str) -> Svg<'a> {
    let file = ICONS
        .get_file(format!("{name}.svg"))
        .unwrap_or_else(|| panic!("missing icon: {name}"));

    Svg::new(svg::Handle::from_memory(file.contents()))
        .width(16)
        .height(16)
}
