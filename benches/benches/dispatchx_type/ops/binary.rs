use criterion::{black_box, Criterion};
use dispatchx_core::{error::Result, scalar_type::ScalarType};
use dispatchx_type::{cpu, Tensor};

// Constants for benchmark data sizes
const SIZES: [(usize, &str); 3] = [(100, "small"), (5000, "medium"), (10000, "large")];

const SCALAR_TYPES: [ScalarType; 4] = [ScalarType::I32, ScalarType::F16, ScalarType::F32, ScalarType::F64];

fn bench_binary_op<F>(b: &mut criterion::Bencher, scalar_type: ScalarType, size: usize, op_fn: F)
where
    F: Fn(&Tensor, &Tensor) -> Result<Tensor>,
{
    let x_data: Vec<f32> = (0..size).map(|i| (i % 100) as f32 + 2.0).collect();
    let y_data: Vec<f32> = (0..size).map(|i| (i % 7) as f32 + 1.0).collect();

    let ty = cpu(scalar_type).unwrap();
    let x = ty.tensor_from_data(&x_data, &[size]).unwrap();
    let y = ty.tensor_from_data(&y_data, &[size]).unwrap();

    b.iter(|| black_box(op_fn(&x, &y)).unwrap())
}

pub fn basic(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("binary/basic");
    group.warm_up_time(core::time::Duration::from_millis(500));
    group.measurement_time(core::time::Duration::from_secs(3));
    group.sample_size(50);

    let operations: Vec<(&str, Box<dyn Fn(&Tensor, &Tensor) -> Result<Tensor>>)> = vec![
        ("add", Box::new(|x, y| x.add(y))),
        ("sub", Box::new(|x, y| x.sub(y))),
        ("mul", Box::new(|x, y| x.mul(y))),
        ("div", Box::new(|x, y| x.div(y))),
    ];

    for (op_name, op_fn) in &operations {
        for scalar_type in SCALAR_TYPES {
            for &(size, size_name) in &SIZES {
                let bench_name = format!("{}/{}/{}", op_name, scalar_type.as_str(), size_name);
                group.bench_function(&bench_name, |b| bench_binary_op(b, scalar_type, size, op_fn));
            }
        }
    }

    group.finish();
}
