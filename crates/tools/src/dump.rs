use glam::Mat4;
use shapeyard_engine::DrawRecord;

fn translation(transform: &Mat4) -> (f32, f32, f32) {
    let t = transform.w_axis.truncate();
    (t.x, t.y, t.z)
}

/// One draw record as a short human-readable line.
pub fn format_record(record: &DrawRecord) -> String {
    match record {
        DrawRecord::Model { model, transform, .. } => {
            let (x, y, z) = translation(transform);
            format!("model #{} at ({x:.2}, {y:.2}, {z:.2})", model.0)
        }
        DrawRecord::Text { text, .. } => format!("text {text:?}"),
        DrawRecord::Line { start, end, .. } => format!(
            "line ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
            start.x, start.y, start.z, end.x, end.y, end.z
        ),
        DrawRecord::WindowBegin { title, .. } => format!("window {title:?} begin"),
        DrawRecord::Label { text } => format!("label {text:?}"),
        DrawRecord::Radio { label, active } => {
            if *active {
                format!("radio {label:?} (selected)")
            } else {
                format!("radio {label:?}")
            }
        }
        DrawRecord::SameLine => "same-line".to_string(),
        DrawRecord::Button { label } => format!("button {label:?}"),
        DrawRecord::WindowEnd => "window end".to_string(),
        DrawRecord::Handle { id, .. } => format!("handle [{:.8}]", id),
    }
}

/// A whole frame's records, one line each.
pub fn dump_frame(records: &[DrawRecord]) -> String {
    records
        .iter()
        .map(format_record)
        .collect::<Vec<_>>()
        .join("\n")
}
