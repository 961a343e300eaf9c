use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pga_motor::geometry::point;
use pga_motor::{Blade, Multivector};

criterion_main! { products }
criterion_group! { products, geometric, wedge, antiwedge }

fn geometric(crit: &mut Criterion) {
    let a = Multivector::from_fn(|b| b.index() as f64 + 1.);
    let b = Multivector::from_fn(|b| 2. - b.index() as f64);

    crit.bench_function("geometric", |bench| {
        bench.iter(|| {
            black_box(&a * &b);
        })
    });
}

fn wedge(crit: &mut Criterion) {
    let x = Multivector::blade(Blade::E1, 1.).with(Blade::E0, -2.);
    let y = Multivector::blade(Blade::E2, 1.).with(Blade::E0, 3.);

    crit.bench_function("wedge", |bench| {
        bench.iter(|| {
            black_box(&x ^ &y);
        })
    });
}

fn antiwedge(crit: &mut Criterion) {
    let a = point(0., 0., 0.);
    let b = point(1., 1., 1.);
    let c = point(2., 3., 5.);

    crit.bench_function("antiwedge", |bench| {
        bench.iter(|| {
            black_box(&(&a & &b) & &c);
        })
    });
}
