use butils::{
    pool::TaskPoolInner,
    random::{FastRand, RandSource},
};
use tokio::runtime::Builder;
use std::time::Duration;


fn main() {
    let rt = Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();

    rt.block_on(async {
        let latency = FastRand::new();
        let pool = TaskPoolInner::new(2, move |name: &'static str| {
            std::thread::sleep(Duration::from_millis((latency.next_u32() % 100) as u64));
            println!("Handled {name}");
        })
        .unwrap();

        pool.start().unwrap();

        for name in ["Foo", "Baar", "Baloo", "Golang"] {
            pool.feed(name).await.unwrap();
        }

        while !pool.is_done() {
            tokio::time::sleep(Duration::from_millis(10)).await;
            println!("Waiting ...");
        }

        pool.stop();
        pool.join().await;
        println!("Done.");
    });
}
