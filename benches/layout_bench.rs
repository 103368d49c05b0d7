use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use fleet_gantt::core::TimeWindow;
use fleet_gantt::render::LayoutConfig;
use fleet_gantt::schedule::{
    Flight, adapt_ground_response, adapt_trip_response, derive_ground_response,
    derive_trip_response,
};
use std::hint::black_box;

const AIRCRAFT: usize = 200;
const LEGS_PER_AIRCRAFT: usize = 40;

fn generated_fleet() -> (Vec<Flight>, Vec<String>) {
    let origin = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    let ids: Vec<String> = (0..AIRCRAFT).map(|i| format!("PLANE_{i:03}")).collect();
    let airports = ["HKG", "NRT", "SIN", "BKK", "ICN"];

    let mut flights = Vec::with_capacity(AIRCRAFT * LEGS_PER_AIRCRAFT);
    for (a, id) in ids.iter().enumerate() {
        for leg in 0..LEGS_PER_AIRCRAFT {
            let departure = origin + Duration::minutes((leg * 250 + a * 7) as i64);
            flights.push(Flight {
                id: (a * LEGS_PER_AIRCRAFT + leg) as u64,
                aircraft_id: id.clone(),
                origin: airports[leg % airports.len()].to_owned(),
                destination: airports[(leg + 1) % airports.len()].to_owned(),
                departure,
                arrival: departure + Duration::minutes(180),
            });
        }
    }
    (flights, ids)
}

fn bench_trip_layout_large_fleet(c: &mut Criterion) {
    let (flights, ids) = generated_fleet();
    let origin = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    let window = TimeWindow::new(origin, origin + Duration::days(7)).expect("valid window");
    let model = adapt_trip_response(&derive_trip_response(&flights, &ids, window))
        .expect("valid model");

    c.bench_function("trip_layout_200x40", |b| {
        b.iter(|| {
            let _ = model
                .layout(black_box(LayoutConfig::default()))
                .expect("layout");
        })
    });
}

fn bench_ground_derivation_large_fleet(c: &mut Criterion) {
    let (flights, ids) = generated_fleet();
    let origin = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
    let window = TimeWindow::new(origin, origin + Duration::days(7)).expect("valid window");

    c.bench_function("ground_derive_and_adapt_200x40", |b| {
        b.iter(|| {
            let response = derive_ground_response(black_box(&flights), &ids, window);
            let _ = adapt_ground_response(&response).expect("model");
        })
    });
}

criterion_group!(
    benches,
    bench_trip_layout_large_fleet,
    bench_ground_derivation_large_fleet
);
criterion_main!(benches);
