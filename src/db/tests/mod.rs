mod downloads;
