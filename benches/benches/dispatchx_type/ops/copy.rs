use criterion::{black_box, Criterion};
use dispatchx_core::scalar_type::ScalarType;
use dispatchx_type::cpu;

const SIZES: [(usize, &str); 3] = [(64, "small"), (256, "medium"), (512, "large")];

const CONVERSIONS: [(ScalarType, ScalarType); 4] = [
    (ScalarType::F32, ScalarType::F32),
    (ScalarType::F32, ScalarType::F64),
    (ScalarType::F32, ScalarType::F16),
    (ScalarType::F64, ScalarType::I32),
];

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("copy/basic");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(50);

    for (src_type, dst_type) in CONVERSIONS {
        for &(side, size_name) in &SIZES {
            let data: Vec<f32> = (0..side * side).map(|i| i as f32 * 0.5).collect();
            let src = cpu(src_type).unwrap().tensor_from_data(&data, &[side, side]).unwrap();
            let transposed = src.transpose(0, 1).unwrap();
            let mut dst = cpu(dst_type).unwrap().tensor(&[side, side]).unwrap();

            let name = format!("{}->{}/{}", src_type.as_str(), dst_type.as_str(), size_name);
            group.bench_function(format!("contiguous/{}", name), |b| b.iter(|| dst.copy_(black_box(&src)).unwrap()));
            group.bench_function(format!("transposed/{}", name), |b| {
                b.iter(|| dst.copy_(black_box(&transposed)).unwrap())
            });
        }
    }

    group.finish();
}
