use crate::types::marker::{marker_label, Marker};
use charming::element::{Label, MarkLine, MarkLineData, MarkLineVariant};

/// Vertical reference lines: one per run start at the time the run started, labelled by
/// position. When the first marker displays earlier than its run start, an unlabelled
/// boundary is drawn there as well, marking where the charted data begins.
pub fn mark_line(markers: &[Marker]) -> MarkLine {
    let leading = markers
        .first()
        .filter(|marker| marker.display_at < marker.at)
        .map(|marker| {
            MarkLineVariant::Simple(
                MarkLineData::new()
                    .x_axis(marker.display_at.to_rfc3339())
                    .label(Label::new().show(false)),
            )
        });
    let runs = markers.iter().enumerate().map(|(position, marker)| {
        MarkLineVariant::Simple(
            MarkLineData::new()
                .x_axis(marker.at.to_rfc3339())
                .label(Label::new().formatter(marker_label(position).as_str())),
        )
    });
    MarkLine::new().data(leading.into_iter().chain(runs).collect::<Vec<_>>())
}
