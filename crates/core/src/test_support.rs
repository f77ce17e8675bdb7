// SOI, one APP1 Exif segment whose Exif IFD holds only DateTimeOriginal, EOI.
pub fn jpeg_with_exif_date(date: &str) -> Vec<u8> {
    assert_eq!(date.len(), 19, "EXIF dates are YYYY:MM:DD HH:MM:SS");

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());

    // IFD0 at 8: ExifIFDPointer -> 26
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x8769u16.to_be_bytes());
    tiff.extend_from_slice(&4u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&26u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());

    // Exif IFD at 26: DateTimeOriginal ASCII[20] -> 44
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x9003u16.to_be_bytes());
    tiff.extend_from_slice(&2u16.to_be_bytes());
    tiff.extend_from_slice(&20u32.to_be_bytes());
    tiff.extend_from_slice(&44u32.to_be_bytes());
    tiff.extend_from_slice(&0u32.to_be_bytes());

    tiff.extend_from_slice(date.as_bytes());
    tiff.push(0);

    let mut segment = b"Exif\x00\x00".to_vec();
    segment.extend_from_slice(&tiff);

    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    out.extend_from_slice(&((segment.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&segment);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

pub fn mvhd_box(size: u32, creation_time: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&size.to_be_bytes());
    out.extend_from_slice(b"mvhd");
    out.extend_from_slice(&[0; 8]);
    out.extend_from_slice(&creation_time.to_be_bytes());
    let len = (size as usize).max(out.len());
    out.resize(len, 0);
    out
}

pub fn mp4_with_mvhd(prefix_len: usize, creation_time: u32) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&16u32.to_be_bytes());
    out.extend_from_slice(b"ftypisom");
    out.extend_from_slice(&[0, 0, 2, 0]);
    out.resize(out.len() + prefix_len, 0);

    let mvhd = mvhd_box(108, creation_time);
    out.extend_from_slice(&((mvhd.len() + 8) as u32).to_be_bytes());
    out.extend_from_slice(b"moov");
    out.extend_from_slice(&mvhd);
    out
}
