use criterion::{black_box, Criterion};
use dispatchx_core::{backend::Backend, scalar_type::ScalarType};
use dispatchx_type::{cpu, get_type, global_context};

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("dispatch/basic");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(50);

    group.bench_function("get_type", |b| {
        b.iter(|| get_type(black_box(Backend::CPU), black_box(ScalarType::F32)).unwrap())
    });

    group.bench_function("to_backend", |b| {
        let ty = cpu(ScalarType::F64).unwrap();
        b.iter(|| black_box(ty).to_backend(Backend::SparseCPU).unwrap())
    });

    let x = cpu(ScalarType::F32).unwrap().tensor_from_data(&[1.0f32; 16], &[16]).unwrap();
    let y = x.clone();
    group.bench_function("call_op/add", |b| {
        b.iter(|| global_context().call_op("add", &[black_box(&x), black_box(&y)]).unwrap())
    });
    group.bench_function("method/add", |b| b.iter(|| black_box(&x).add(black_box(&y)).unwrap()));

    group.finish();
}
