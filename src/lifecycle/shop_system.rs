use crate::arrivals::{Arrival, Arrivals};
use crate::barber_pool::BarberPool;
use crate::config::ShopConfig;
use crate::customer_actor::{self, VisitOutcome};
use crate::error::ShopError;
use crate::model::Customer;
use crate::names::barber_name;
use crate::waiting_room::{SeatAllocator, WaitingRoom};
use shop_registry::{NewCustomer, RegistryActor, RegistryClient, ShopReport};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

/// Request buffer of the registry actor.
const REGISTRY_BUFFER: usize = 64;

/// The running shop: registry actor, seat allocator, barbers and every customer
/// task spawned so far.
///
/// # Example
///
/// ```ignore
/// let mut shop = ShopSystem::open(&config)?;
/// shop.welcome(Arrivals::new(config.customers, config.rate_ms, config.seed)).await?;
/// let report = shop.close().await?;
/// ```
pub struct ShopSystem {
    registry: RegistryClient,
    allocator: Arc<dyn SeatAllocator>,
    barbers: BarberPool,
    customers: Vec<JoinHandle<Result<VisitOutcome, ShopError>>>,
    registry_handle: JoinHandle<ShopReport>,
}

impl ShopSystem {
    /// Opens a shop with the standard [`WaitingRoom`].
    pub fn open(config: &ShopConfig) -> Result<Self, ShopError> {
        let (chairs, barbers) = (config.chairs, config.barbers);
        Self::open_with(config, move |registry| {
            let room: Arc<dyn SeatAllocator> = Arc::new(WaitingRoom::new(chairs, barbers, registry));
            room
        })
    }

    /// Opens a shop with a custom seat allocator, built from a registry client.
    ///
    /// 1. Spawns the registry actor (the shop clock starts here)
    /// 2. Builds the allocator
    /// 3. Spawns one worker per barber
    pub fn open_with<F>(config: &ShopConfig, allocator: F) -> Result<Self, ShopError>
    where
        F: FnOnce(RegistryClient) -> Arc<dyn SeatAllocator>,
    {
        config.validate()?;

        let (actor, registry) = RegistryActor::new(config.limits(), REGISTRY_BUFFER);
        let registry_handle = tokio::spawn(actor.run());

        let allocator = allocator(registry.clone());
        let barbers = BarberPool::spawn(config.barbers, allocator.clone(), registry.clone());
        info!(
            barbers = config.barbers,
            chairs = config.chairs,
            customers = config.customers,
            "Shop open"
        );

        Ok(Self {
            registry,
            allocator,
            barbers,
            customers: Vec::with_capacity(config.customers),
            registry_handle,
        })
    }

    /// A client for the registry actor.
    ///
    /// The registry only reports once every client is gone, so each clone
    /// handed out here must be dropped before [`ShopSystem::close`] can finish.
    pub fn registry(&self) -> RegistryClient {
        self.registry.clone()
    }

    /// Lets every arrival in, pausing before each one for its delay.
    pub async fn welcome<I>(&mut self, arrivals: I) -> Result<(), ShopError>
    where
        I: IntoIterator<Item = Arrival>,
    {
        for arrival in arrivals {
            tokio::time::sleep(arrival.delay).await;
            self.arrive(arrival).await?;
        }
        Ok(())
    }

    /// Spawns the customer's task, registers it, then hands it its record.
    async fn arrive(&mut self, arrival: Arrival) -> Result<(), ShopError> {
        let (hand_over, record) = oneshot::channel();
        let handle = tokio::spawn(customer_actor::visit(
            record,
            self.allocator.clone(),
            self.registry.clone(),
        ));
        let task = handle.id();
        self.customers.push(handle);

        let id = self
            .registry
            .register(NewCustomer {
                name: arrival.name.clone(),
                hair_length: arrival.hair_length,
                hair_goal: arrival.hair_goal,
                task: Some(task),
            })
            .await?;

        let _ = hand_over.send(Arc::new(Customer {
            id,
            name: arrival.name,
            hair_length: arrival.hair_length,
            hair_goal: arrival.hair_goal,
            arrived_at: Instant::now(),
        }));
        Ok(())
    }

    /// Closing time.
    ///
    /// 1. Waits for every customer to leave (fails fast if a barber fails)
    /// 2. Closes the waiting room
    /// 3. Waits for every barber to go home
    /// 4. Drops the last registry clients and collects the report
    pub async fn close(self) -> Result<ShopReport, ShopError> {
        let ShopSystem {
            registry,
            allocator,
            mut barbers,
            customers,
            registry_handle,
        } = self;

        let stranded = tokio::select! {
            left = leave(customers) => left?,
            failure = barbers.failure() => return Err(failure),
        };

        allocator.close().await;
        let shifts = barbers.join().await?;
        for shift in &shifts {
            info!(barber = barber_name(shift.room), served = shift.served, "Shift over");
        }
        if stranded > 0 {
            warn!(stranded, "Customers left without being called in");
        }

        drop(allocator);
        drop(registry);
        let report = registry_handle.await?;
        info!(
            served = report.served,
            rejected = report.rejected,
            complaints = report.total_complaints(),
            "Shop closed"
        );
        Ok(report)
    }

    /// Opens, runs a full day of generated arrivals and closes.
    pub async fn run(config: &ShopConfig) -> Result<ShopReport, ShopError> {
        let mut shop = Self::open(config)?;
        shop.welcome(Arrivals::new(config.customers, config.rate_ms, config.seed))
            .await?;
        shop.close().await
    }
}

/// Joins every customer task. Returns how many were stranded.
async fn leave(
    customers: Vec<JoinHandle<Result<VisitOutcome, ShopError>>>,
) -> Result<usize, ShopError> {
    let mut stranded = 0;
    for handle in customers {
        if handle.await?? == VisitOutcome::Stranded {
            stranded += 1;
        }
    }
    Ok(stranded)
}
