//! Tests for device id lists through the public API

use tigre_gpu::*;

/// Four identical boards.
struct QuadRuntime;

impl Runtime for QuadRuntime {
    fn name() -> &'static str {
        "Quad"
    }

    fn device_count() -> Result<usize> {
        Ok(4)
    }
}

#[test]
fn test_round_trip_various_lengths() {
    for len in [1usize, 2, 8, 64] {
        let source: Vec<usize> = (0..len).map(|i| i * 3 + 1).collect();
        let mut ids = GpuIds::new();
        ids.set_ids(&source).unwrap();

        assert_eq!(ids.len(), len);
        for (i, &expected) in source.iter().enumerate() {
            assert_eq!(ids.get(i).unwrap(), expected);
        }
        assert!(matches!(
            ids.get(len),
            Err(GpuError::IndexOutOfRange { .. })
        ));
    }
}

#[test]
fn test_replacement_leaves_no_residue() {
    let mut ids = GpuIds::try_from(vec![7usize, 8, 9, 10]).unwrap();
    ids.set_ids(&[1, 2]).unwrap();
    assert_eq!(ids.as_slice(), &[1, 2]);
    assert_eq!(ids.to_string(), "1,2");
}

#[test]
fn test_rejected_input_keeps_length() {
    let mut ids = GpuIds::new();
    assert!(ids.set_ids(&[]).is_err());
    assert_eq!(ids.len(), 0);

    ids.set_ids(&[0, 1, 2]).unwrap();
    assert!(ids.set_ids(&[]).is_err());
    assert!(ids.set_all_gpus(0).is_err());
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_set_all_gpus_five() {
    let mut ids = GpuIds::new();
    ids.set_all_gpus(5).unwrap();
    assert_eq!(ids.len(), 5);
    for i in 0..5 {
        assert_eq!(ids.get(i).unwrap(), i);
    }
}

#[test]
fn test_create_populate_drop_cycles() {
    for round in 1..=100 {
        let mut ids = GpuIds::new();
        ids.set_all_gpus(round).unwrap();
        assert_eq!(ids.len(), round);
    }
}

#[test]
fn test_default_runtime_naming() {
    let ids = GpuIds::all::<QuadRuntime>().unwrap();
    let names = ids.names::<QuadRuntime>().unwrap();
    assert_eq!(names[3], "GPU Device 3");

    let same = GpuIds::with_name::<QuadRuntime>("GPU Device 2").unwrap();
    assert_eq!(same.as_slice(), &[2]);
}

#[test]
fn test_cpu_runtime_offers_no_gpus() {
    assert!(GpuIds::all::<CpuRuntime>().is_err());
    assert!(GpuIds::with_name::<CpuRuntime>("").unwrap().is_empty());
}

#[test]
fn test_parse_from_str() {
    let ids: GpuIds = "3, 1".parse().unwrap();
    assert_eq!(ids.as_slice(), &[3, 1]);
    assert!("".parse::<GpuIds>().is_err());
}

#[cfg(feature = "cuda")]
mod cuda_tests {
    use super::*;

    #[test]
    fn test_all_cuda_devices() {
        if !CudaRuntime::is_available() {
            return;
        }
        let ids = GpuIds::all::<CudaRuntime>().unwrap();
        assert_eq!(ids.len(), CudaRuntime::device_count().unwrap());
        let devices = ids.devices::<CudaRuntime>().unwrap();
        assert!(devices.iter().all(|d| !d.name().is_empty()));
    }
}
