use super::*;

#[test]
fn resolution_table() {
    let cases = [
        (DiscFormat::Dvd, TvSystem::Ntsc, (720, 480)),
        (DiscFormat::Dvd, TvSystem::Pal, (720, 576)),
        (DiscFormat::HalfDvd, TvSystem::Ntsc, (352, 480)),
        (DiscFormat::HalfDvd, TvSystem::Pal, (352, 576)),
        (DiscFormat::Svcd, TvSystem::Ntsc, (480, 480)),
        (DiscFormat::Svcd, TvSystem::Pal, (480, 576)),
        (DiscFormat::Vcd, TvSystem::Ntsc, (352, 240)),
        (DiscFormat::Vcd, TvSystem::Pal, (352, 288)),
    ];
    for (format, tv, (w, h)) in cases {
        let size = VideoStandard::new(format, tv).size();
        assert_eq!((size.width, size.height), (w, h), "{format} {tv}");
    }
}

#[test]
fn frame_rates() {
    assert_eq!(TvSystem::Ntsc.fps(), Fps::new(30000, 1001).unwrap());
    assert_eq!(TvSystem::Pal.fps(), Fps::new(25, 1).unwrap());
    assert_eq!(VideoStandard::default().fps(), TvSystem::Ntsc.fps());
}

#[test]
fn names_parse_back() {
    assert_eq!("PAL".parse::<TvSystem>().unwrap(), TvSystem::Pal);
    assert_eq!("half-dvd".parse::<DiscFormat>().unwrap(), DiscFormat::HalfDvd);
    for f in DiscFormat::ALL {
        assert_eq!(f.to_string().parse::<DiscFormat>().unwrap(), f);
    }
    assert!("secam".parse::<TvSystem>().is_err());
    assert!("bluray".parse::<DiscFormat>().is_err());
    assert_eq!(
        VideoStandard::new(DiscFormat::Svcd, TvSystem::Pal).to_string(),
        "svcd-pal"
    );
}
