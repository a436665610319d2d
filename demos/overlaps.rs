use chrono::NaiveDate;
use chronoval::{gaps_within, merge_blocks, DateInterval, IntervalTree};

fn main() {
    let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();

    let bookings = [
        DateInterval::closed(d(3, 1), d(3, 9)).unwrap(),
        DateInterval::closed(d(3, 8), d(3, 14)).unwrap(),
        DateInterval::closed(d(3, 20), d(3, 22)).unwrap(),
        DateInterval::since(d(3, 28)),
    ];
    let tree = IntervalTree::on(bookings).unwrap();

    let probe = DateInterval::closed(d(3, 9), d(3, 21)).unwrap();
    println!("Bookings overlapping {probe}:");
    for booking in tree.find_overlapping(&probe) {
        println!("  {booking}  {}", booking.relation_to(&probe));
    }

    let march = DateInterval::closed(d(3, 1), d(3, 31)).unwrap();
    let blocks = merge_blocks(&bookings);
    println!("Free in March:");
    for gap in gaps_within(&march, &blocks) {
        println!("  {gap}");
    }
}
