// Example: reveal-on-scroll against the DOM-emulating host.
use scroll_reveal::{
    HeadlessElement, HeadlessHost, Rect, RevealOverrides, WatchEntry, watch_many,
};

fn main() {
    // An 800x600 viewport over a page of ten 300px-tall sections.
    let host = HeadlessHost::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let sections: Vec<HeadlessElement> = (0..10)
        .map(|i| {
            host.append(
                HeadlessElement::new("section")
                    .with_class("reveal")
                    .with_rect(Rect::new(0.0, i as f64 * 300.0, 800.0, 300.0)),
            )
        })
        .collect();
    host.append(
        HeadlessElement::new("footer")
            .with_id("footer")
            .with_rect(Rect::new(0.0, 3000.0, 800.0, 100.0)),
    );

    let entries = [
        WatchEntry::new(".reveal"),
        WatchEntry::new("#footer")
            .with_overrides(RevealOverrides::new().visible_class("shown").once(false)),
    ];
    let watchers = watch_many(&host, &entries).expect("valid selectors");
    println!("watchers={}", watchers.len());

    let mut y = 0.0;
    while y <= 2600.0 {
        host.scroll_to(0.0, y);
        let delivered = host.tick();
        let revealed = sections.iter().filter(|s| s.has_class("visible")).count();
        println!("scroll_y={y} delivered={delivered} revealed={revealed}/10");
        y += 400.0;
    }

    for w in &watchers {
        println!("{} -> still observing {}", w.selector(), w.observer().observed().len());
        w.disconnect();
    }
}
