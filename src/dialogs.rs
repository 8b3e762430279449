// Native file dialogs for image selection and MIDI save

use native_dialog::FileDialogBuilder;
use std::path::PathBuf;

/// Prompt for the source image. `None` means the user cancelled.
pub fn select_image() -> anyhow::Result<Option<PathBuf>> {
    let path = FileDialogBuilder::default()
        .add_filter(
            "Image files",
            ["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"],
        )
        .set_title("Select an image file")
        .open_single_file()
        .show()?;
    Ok(path)
}

/// Prompt for the MIDI destination. `None` means the user cancelled.
pub fn save_midi_as() -> anyhow::Result<Option<PathBuf>> {
    let path = FileDialogBuilder::default()
        .add_filter("MIDI files", ["mid"])
        .set_title("Save MIDI file as")
        .set_filename("image.mid")
        .save_single_file()
        .show()?;
    Ok(path)
}
