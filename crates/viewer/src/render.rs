use bytesize::ByteSize;
use chrono::{DateTime, Local, TimeZone};
use ftags_graph::{classify_icon, ChildListing, LayeredAncestors, VaultFile};
use ftags_protocol::{Chip, ChildStrip, ChipStrip, Layer, TreeItem};
use std::fmt::Display;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn build_chip_strip(layers: &LayeredAncestors, add_tag_button: bool) -> ChipStrip {
    let chips = layers
        .iter()
        .map(|(layer, file)| Chip {
            path: file.path.clone(),
            label: format!("#{}", file.basename()),
            layer,
            removable: layer == Layer::First,
            tooltip: tooltip(file),
        })
        .collect();

    ChipStrip {
        add_tag_button,
        chips,
    }
}

pub fn build_child_strip(listing: &ChildListing) -> ChildStrip {
    let items = listing
        .shown
        .iter()
        .map(|child| TreeItem {
            path: child.path.clone(),
            label: child.basename().to_string(),
            icon: classify_icon(child),
            tooltip: Some(tooltip(child)),
        })
        .collect();

    ChildStrip {
        items,
        more: listing.overflowed.then(TreeItem::more),
    }
}

/// Name, timestamps and size of a file in the local timezone
pub fn tooltip(file: &VaultFile) -> String {
    tooltip_in(file, &Local)
}

pub fn tooltip_in<Tz>(file: &VaultFile, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}\n\nLast modified at {}\nCreated at {}\nSize {}",
        file.name(),
        format_timestamp(file.stat.mtime, tz),
        format_timestamp(file.stat.ctime, tz),
        ByteSize::b(file.stat.size).to_string_as(true),
    )
}

fn format_timestamp<Tz>(millis: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    DateTime::from_timestamp_millis(millis)
        .map(|utc| utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
