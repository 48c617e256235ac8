use vidprep_core::{MonitorState, ProgressConfig, ProgressMonitor};

fn config(total: Option<u64>) -> ProgressConfig {
    ProgressConfig {
        total_frames: total,
        ..ProgressConfig::default()
    }
}

#[test]
fn test_two_blocks_then_end() {
    let input = "frame=10\nfps=25.0\nspeed=1.02x\nframe=20\nfps=25.0\nspeed=1.05x\nprogress=end\n";
    let mut monitor = ProgressMonitor::new(Vec::new(), &config(Some(100)));
    let summary = monitor.run(input.as_bytes()).unwrap();

    assert_eq!(summary.redraws, 2);
    assert!(summary.reached_end);
    assert_eq!(monitor.monitor_state(), MonitorState::Done);

    let out = String::from_utf8(monitor.into_inner()).unwrap();
    assert_eq!(
        out,
        "\rProgress:  10% | frame=10 | fps=25.0 | speed=1.02x \
         \rProgress:  20% | frame=20 | fps=25.0 | speed=1.05x \n"
    );
}

#[test]
fn test_ffmpeg_block_with_extra_keys() {
    let input = "frame=48\n\
                 fps=23.98\n\
                 stream_0_0_q=28.0\n\
                 bitrate=1234.5kbits/s\n\
                 total_size=1048576\n\
                 out_time_us=2002000\n\
                 out_time=00:00:02.002000\n\
                 dup_frames=0\n\
                 drop_frames=0\n\
                 speed=0.998x\n\
                 progress=continue\n";
    let mut monitor = ProgressMonitor::new(Vec::new(), &config(None));
    let summary = monitor.run(input.as_bytes()).unwrap();

    assert_eq!(summary.redraws, 1);
    assert!(!summary.reached_end);
    let out = String::from_utf8(monitor.into_inner()).unwrap();
    assert_eq!(
        out,
        "\rProgress: ?% | frame=48 | fps=23.98 | speed=0.998x \n"
    );
}

#[test]
fn test_crlf_input_is_trimmed() {
    let input = "frame=5\r\nfps=30\r\nspeed=2x\r\nprogress=end\r\n";
    let mut monitor = ProgressMonitor::new(Vec::new(), &config(Some(10)));
    monitor.run(input.as_bytes()).unwrap();
    let out = String::from_utf8(monitor.into_inner()).unwrap();
    assert_eq!(out, "\rProgress:  50% | frame=5 | fps=30 | speed=2x \n");
}
