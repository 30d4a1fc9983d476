use anyhow::{anyhow, Result};
use crossbeam_channel::Sender;
use egui::Context;
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use gstreamer_video::VideoFrameExt;

/// One decoded frame with its rows packed tight as RGBA.
pub struct VideoFrame {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Build the bin installed as the player's video sink.
///
/// `videoconvert ! appsink` with RGBA caps, ghost-padded so the player can
/// link to it. The appsink callback runs on a streaming thread: it packs each
/// sample into a [`VideoFrame`], hands it to the UI over `sender` (dropping
/// the frame when the UI is behind) and requests a repaint.
pub fn frame_sink(sender: Sender<VideoFrame>, ctx: Context) -> Result<gst::Bin> {
    let bin = gst::Bin::builder().name("frame-sink").build();
    let convert = gst::ElementFactory::make("videoconvert").build()?;

    let caps = gst_video::VideoCapsBuilder::new()
        .format(gst_video::VideoFormat::Rgba)
        .pixel_aspect_ratio(gst::Fraction::new(1, 1))
        .build();
    let appsink = gst_app::AppSink::builder()
        .name("frame-sink-appsink")
        .caps(&caps)
        .max_buffers(2)
        .drop(true)
        .build();

    bin.add_many([&convert, appsink.upcast_ref()])?;
    gst::Element::link_many([&convert, appsink.upcast_ref()])?;

    let pad = convert
        .static_pad("sink")
        .ok_or_else(|| anyhow!("videoconvert has no sink pad"))?;
    let ghost = gst::GhostPad::with_target(&pad)?;
    bin.add_pad(&ghost)?;

    appsink.set_callbacks(
        gst_app::AppSinkCallbacks::builder()
            .new_sample(move |sink| {
                let frame = take_frame(sink)?;
                if sender.try_send(frame).is_ok() {
                    ctx.request_repaint();
                }
                Ok(gst::FlowSuccess::Ok)
            })
            .build(),
    );

    Ok(bin)
}

/// Map the next sample and copy it out as a tightly packed frame.
fn take_frame(sink: &gst_app::AppSink) -> Result<VideoFrame, gst::FlowError> {
    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
    let buffer = sample.buffer().ok_or(gst::FlowError::Error)?;
    let caps = sample.caps().ok_or(gst::FlowError::Error)?;
    let info = gst_video::VideoInfo::from_caps(caps).map_err(|_| gst::FlowError::Error)?;
    let frame = gst_video::VideoFrameRef::from_buffer_ref_readable(buffer, &info)
        .map_err(|_| gst::FlowError::Error)?;

    let width = info.width() as usize;
    let height = info.height() as usize;
    let stride = frame.plane_stride()[0] as usize;
    let data = frame.plane_data(0).map_err(|_| gst::FlowError::Error)?;

    Ok(VideoFrame {
        width,
        height,
        rgba: pack_rows(data, stride, width, height),
    })
}

/// Pack possibly padded rows into a tight `width * height * 4` buffer.
fn pack_rows(data: &[u8], stride: usize, width: usize, height: usize) -> Vec<u8> {
    let row_len = width * 4;
    if stride == row_len {
        return data[..row_len * height].to_vec();
    }
    let mut rgba = Vec::with_capacity(row_len * height);
    for row in data.chunks(stride).take(height) {
        rgba.extend_from_slice(&row[..row_len]);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_input_is_copied_through() {
        let data: Vec<u8> = (0..16).collect();
        assert_eq!(pack_rows(&data, 8, 2, 2), data);
    }

    #[test]
    fn padded_rows_are_packed_tight() {
        // Two 2-pixel rows, each with 4 bytes of padding.
        let mut data = Vec::new();
        data.extend_from_slice(&[1; 8]);
        data.extend_from_slice(&[0xAA; 4]);
        data.extend_from_slice(&[2; 8]);
        data.extend_from_slice(&[0xBB; 4]);

        let rgba = pack_rows(&data, 12, 2, 2);
        let mut expected = vec![1; 8];
        expected.extend_from_slice(&[2; 8]);
        assert_eq!(rgba, expected);
    }

    #[test]
    fn missing_trailing_padding_is_tolerated() {
        // The last row ends right after its pixel data.
        let mut data = Vec::new();
        data.extend_from_slice(&[1; 8]);
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&[2; 8]);

        let rgba = pack_rows(&data, 12, 2, 2);
        assert_eq!(rgba.len(), 16);
        assert_eq!(rgba[8..], [2; 8]);
    }
}
